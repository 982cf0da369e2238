//! Default data for every component kind
//!
//! Each kind's defaults double as its schema: the property editor derives
//! field kinds from the shape of these values, so every editable field must
//! be present here with a representative value.

use crate::registry::ComponentKind;
use serde_json::{Value, json};

/// Default data payload for a component kind
pub(crate) fn defaults(kind: ComponentKind) -> Value {
    use ComponentKind::*;

    match kind {
        // ====================================================================
        // Navigation
        // ====================================================================
        Navbar => json!({
            "logo": "/assets/logo.svg",
            "brand": "Brand",
            "links": ["Home", "Features", "Pricing", "Contact"],
            "ctaText": "Get Started",
            "ctaLink": "#signup",
            "sticky": true,
            "theme": "light"
        }),
        NavbarCentered => json!({
            "brand": "Brand",
            "leftLinks": ["Products", "Solutions"],
            "rightLinks": ["Blog", "Contact"],
            "backgroundColor": "#ffffff"
        }),
        MegaMenu => json!({
            "brand": "Brand",
            "menus": [
                { "title": "Products", "items": "Analytics, Automation, Reports" },
                { "title": "Company", "items": "About, Careers, Press" }
            ],
            "theme": "light"
        }),
        SidebarNav => json!({
            "title": "Documentation",
            "items": ["Introduction", "Installation", "Configuration", "FAQ"],
            "collapsible": true,
            "width": 260
        }),
        Breadcrumb => json!({
            "items": ["Home", "Library", "Current Page"],
            "separator": "/"
        }),
        AnnouncementBar => json!({
            "message": "We just launched version 2.0!",
            "linkText": "Read more",
            "linkUrl": "#",
            "backgroundColor": "#4f46e5",
            "dismissible": true
        }),

        // ====================================================================
        // Hero
        // ====================================================================
        Hero => json!({
            "title": "Build something amazing",
            "subtitle": "Create beautiful websites without writing a single line of code.",
            "buttonText": "Get Started",
            "buttonLink": "#",
            "backgroundImage": "",
            "alignment": "center"
        }),
        HeroSplit => json!({
            "title": "Launch faster",
            "subtitle": "Everything you need to ship your next idea.",
            "buttonText": "Start free trial",
            "buttonLink": "#",
            "image": "/assets/hero.png",
            "imageOnLeft": false
        }),
        HeroVideo => json!({
            "title": "See it in action",
            "subtitle": "Watch how teams build with us.",
            "videoUrl": "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "autoplay": false,
            "overlayColor": "#00000080"
        }),
        HeroCentered => json!({
            "eyebrow": "New",
            "title": "The all-in-one platform",
            "subtitle": "One tool for your whole team.",
            "primaryButton": "Get Started",
            "secondaryButton": "Learn more"
        }),
        HeroImage => json!({
            "title": "Explore the world",
            "backgroundImage": "/assets/landscape.jpg",
            "height": 600,
            "overlayOpacity": 0.4
        }),
        HeroGradient => json!({
            "title": "Designed for creators",
            "subtitle": "Bold ideas deserve bold pages.",
            "gradientFrom": "#6366f1",
            "gradientTo": "#ec4899",
            "buttonText": "Join now"
        }),

        // ====================================================================
        // Content
        // ====================================================================
        Heading => json!({
            "text": "Section heading",
            "level": 2,
            "alignment": "left"
        }),
        TextBlock => json!({
            "content": "Write your content here. Tell your visitors what makes you different.",
            "alignment": "left"
        }),
        RichText => json!({
            "content": "<p>Start writing...</p>",
            "maxWidth": 720
        }),
        Blockquote => json!({
            "quote": "Simplicity is the ultimate sophistication.",
            "author": "Leonardo da Vinci",
            "accentColor": "#4f46e5"
        }),
        Stats => json!({
            "title": "Trusted by thousands",
            "stats": [
                { "value": "10k+", "label": "Customers" },
                { "value": "99.9%", "label": "Uptime" },
                { "value": "24/7", "label": "Support" }
            ]
        }),
        Timeline => json!({
            "title": "Our journey",
            "events": [
                { "date": "2019", "title": "Founded", "description": "Started in a garage." },
                { "date": "2022", "title": "Series A", "description": "Raised our first round." }
            ]
        }),
        Faq => json!({
            "title": "Frequently asked questions",
            "questions": [
                { "question": "How does it work?", "answer": "Pick components, edit, publish." },
                { "question": "Can I cancel anytime?", "answer": "Yes, there are no contracts." }
            ]
        }),
        Accordion => json!({
            "items": [
                { "title": "Section one", "content": "Content for section one." },
                { "title": "Section two", "content": "Content for section two." }
            ],
            "allowMultiple": false
        }),
        Tabs => json!({
            "tabs": [
                { "label": "Overview", "content": "Overview content." },
                { "label": "Details", "content": "Details content." }
            ],
            "activeTab": 0
        }),
        Cta => json!({
            "title": "Ready to get started?",
            "description": "Join thousands of happy customers today.",
            "buttonText": "Sign up now",
            "buttonLink": "#signup",
            "backgroundColor": "#4f46e5"
        }),
        About => json!({
            "title": "About us",
            "content": "We are a small team with big ambitions.",
            "image": "/assets/team.jpg",
            "highlights": ["Founded 2019", "Remote first", "Customer obsessed"]
        }),
        Team => json!({
            "title": "Meet the team",
            "members": [
                { "name": "Jane Doe", "role": "CEO", "avatar": "/assets/jane.jpg" },
                { "name": "John Smith", "role": "CTO", "avatar": "/assets/john.jpg" }
            ]
        }),
        BlogGrid => json!({
            "title": "Latest articles",
            "posts": [
                { "title": "Getting started", "excerpt": "A quick tour.", "image": "/assets/post1.jpg" },
                { "title": "Design tips", "excerpt": "Make it pop.", "image": "/assets/post2.jpg" }
            ],
            "columns": 3
        }),
        Countdown => json!({
            "title": "Launching soon",
            "targetDate": "2030-01-01T00:00:00Z",
            "showSeconds": true
        }),

        // ====================================================================
        // Features
        // ====================================================================
        Features => json!({
            "title": "Features",
            "subtitle": "Everything you need in one place.",
            "features": [
                { "icon": "zap", "title": "Fast", "description": "Lightning quick load times." },
                { "icon": "shield", "title": "Secure", "description": "Security built in." },
                { "icon": "heart", "title": "Loved", "description": "Customers love it." }
            ]
        }),
        FeatureGrid => json!({
            "title": "Why choose us",
            "features": [
                { "icon": "star", "title": "Quality", "description": "Crafted with care." },
                { "icon": "clock", "title": "Speed", "description": "Ship in minutes." }
            ],
            "columns": 3
        }),
        FeatureList => json!({
            "title": "What's included",
            "items": ["Unlimited pages", "Custom domains", "Analytics", "Priority support"]
        }),
        FeatureAlternating => json!({
            "rows": [
                { "title": "Design visually", "description": "Drag, drop, done.", "image": "/assets/f1.png" },
                { "title": "Publish instantly", "description": "One click to go live.", "image": "/assets/f2.png" }
            ]
        }),
        Services => json!({
            "title": "Our services",
            "services": [
                { "name": "Consulting", "description": "Strategy and planning.", "price": "$99" },
                { "name": "Development", "description": "Build and ship.", "price": "$199" }
            ]
        }),
        Steps => json!({
            "title": "How it works",
            "steps": [
                { "title": "Sign up", "description": "Create your account." },
                { "title": "Build", "description": "Assemble your page." },
                { "title": "Launch", "description": "Publish to the web." }
            ]
        }),
        ComparisonTable => json!({
            "title": "Compare plans",
            "columns": ["Free", "Pro", "Enterprise"],
            "rows": [
                { "feature": "Pages", "values": "3, Unlimited, Unlimited" },
                { "feature": "Support", "values": "Email, Priority, Dedicated" }
            ]
        }),
        Integrations => json!({
            "title": "Works with your tools",
            "logos": ["/assets/slack.svg", "/assets/github.svg", "/assets/stripe.svg"]
        }),

        // ====================================================================
        // Commerce
        // ====================================================================
        Pricing => json!({
            "title": "Simple pricing",
            "subtitle": "Choose the plan that fits.",
            "plans": [
                { "name": "Starter", "price": "$9", "period": "/month", "features": "1 site, Basic analytics", "highlighted": false },
                { "name": "Pro", "price": "$29", "period": "/month", "features": "10 sites, Advanced analytics", "highlighted": true }
            ],
            "billingPeriod": "monthly"
        }),
        PricingTable => json!({
            "title": "Plans and pricing",
            "plans": [
                { "name": "Basic", "price": 0, "buttonText": "Start free" },
                { "name": "Business", "price": 49, "buttonText": "Buy now" }
            ],
            "currency": "USD",
            "showAnnualToggle": true
        }),
        ProductCard => json!({
            "name": "Product name",
            "price": "$49.00",
            "image": "/assets/product.jpg",
            "description": "A short product description.",
            "buttonText": "Add to cart",
            "inStock": true
        }),
        ProductGrid => json!({
            "title": "Shop",
            "products": [
                { "name": "Tee", "price": "$25", "image": "/assets/tee.jpg" },
                { "name": "Mug", "price": "$15", "image": "/assets/mug.jpg" }
            ],
            "columns": 4
        }),
        CartSummary => json!({
            "title": "Your cart",
            "showTax": true,
            "checkoutText": "Checkout",
            "checkoutLink": "/checkout"
        }),
        Checkout => json!({
            "title": "Checkout",
            "fields": ["Name", "Email", "Address", "Card"],
            "submitText": "Pay now",
            "termsUrl": "/terms"
        }),
        PromoBanner => json!({
            "headline": "Summer sale - 30% off",
            "code": "SUMMER30",
            "buttonText": "Shop now",
            "backgroundColor": "#f59e0b"
        }),

        // ====================================================================
        // Social proof
        // ====================================================================
        Testimonials => json!({
            "title": "What our customers say",
            "testimonials": [
                { "quote": "It changed how we work.", "author": "Alex", "role": "Founder", "avatar": "/assets/alex.jpg" },
                { "quote": "Absolutely love it.", "author": "Sam", "role": "Designer", "avatar": "/assets/sam.jpg" }
            ]
        }),
        TestimonialSlider => json!({
            "testimonials": [
                { "quote": "Best tool we have used.", "author": "Riley" },
                { "quote": "Five stars.", "author": "Jordan" }
            ],
            "autoplay": true,
            "interval": 5000
        }),
        LogoCloud => json!({
            "title": "Trusted by leading companies",
            "logos": ["/assets/acme.svg", "/assets/globex.svg", "/assets/initech.svg"],
            "grayscale": true
        }),
        Reviews => json!({
            "title": "Reviews",
            "reviews": [
                { "author": "Chris", "rating": 5, "text": "Fantastic." },
                { "author": "Pat", "rating": 4, "text": "Very good." }
            ],
            "averageRating": 4.5
        }),
        CaseStudy => json!({
            "client": "Acme Corp",
            "title": "How Acme doubled conversions",
            "summary": "A redesign that paid off.",
            "image": "/assets/case.jpg",
            "metrics": ["2x conversions", "40% faster pages"]
        }),
        Badges => json!({
            "badges": ["SOC 2", "GDPR", "ISO 27001"],
            "alignment": "center"
        }),

        // ====================================================================
        // Forms
        // ====================================================================
        ContactForm => json!({
            "title": "Contact us",
            "description": "We usually reply within a day.",
            "fields": [
                { "label": "Name", "type": "text", "required": true },
                { "label": "Email", "type": "email", "required": true },
                { "label": "Message", "type": "textarea", "required": false }
            ],
            "submitText": "Send message",
            "successMessage": "Thanks! We'll be in touch."
        }),
        Newsletter => json!({
            "title": "Subscribe to our newsletter",
            "description": "No spam, unsubscribe anytime.",
            "placeholder": "you@example.com",
            "buttonText": "Subscribe"
        }),
        SignupForm => json!({
            "title": "Create your account",
            "fields": ["Name", "Email", "Password"],
            "submitText": "Sign up",
            "showSocialLogin": true
        }),
        LoginForm => json!({
            "title": "Welcome back",
            "submitText": "Log in",
            "forgotPasswordLink": "/forgot",
            "showRememberMe": true
        }),
        SearchBar => json!({
            "placeholder": "Search...",
            "buttonText": "Search",
            "size": "medium"
        }),
        Survey => json!({
            "title": "Quick survey",
            "questions": ["How did you hear about us?", "What could we improve?"],
            "submitText": "Submit"
        }),
        BookingForm => json!({
            "title": "Book an appointment",
            "services": ["Consultation", "Follow-up"],
            "showCalendar": true,
            "submitText": "Book now"
        }),

        // ====================================================================
        // Media
        // ====================================================================
        Image => json!({
            "src": "/assets/placeholder.jpg",
            "alt": "Image description",
            "caption": "",
            "rounded": false
        }),
        Gallery => json!({
            "title": "Gallery",
            "images": ["/assets/g1.jpg", "/assets/g2.jpg", "/assets/g3.jpg"],
            "columns": 3,
            "lightbox": true
        }),
        Video => json!({
            "videoUrl": "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "poster": "",
            "aspectRatio": "16:9",
            "controls": true
        }),
        Carousel => json!({
            "slides": [
                { "image": "/assets/s1.jpg", "caption": "First slide" },
                { "image": "/assets/s2.jpg", "caption": "Second slide" }
            ],
            "autoplay": true,
            "showDots": true
        }),
        Map => json!({
            "address": "1 Infinite Loop, Cupertino, CA",
            "zoom": 14,
            "height": 400
        }),
        Audio => json!({
            "title": "Episode 1",
            "audioUrl": "/assets/episode1.mp3",
            "showDownload": false
        }),
        Embed => json!({
            "html": "<iframe></iframe>",
            "height": 300
        }),

        // ====================================================================
        // Layout
        // ====================================================================
        Container => json!({
            "maxWidth": 1200,
            "padding": 24,
            "backgroundColor": "#ffffff",
            "style": { "borderRadius": 8, "shadow": false }
        }),
        Columns => json!({
            "columns": 2,
            "gap": 24,
            "content": [
                { "heading": "Column one", "text": "Content for the first column." },
                { "heading": "Column two", "text": "Content for the second column." }
            ]
        }),
        Grid => json!({
            "columns": 3,
            "rows": 2,
            "gap": 16,
            "cells": ["Cell 1", "Cell 2", "Cell 3", "Cell 4", "Cell 5", "Cell 6"]
        }),
        Spacer => json!({
            "height": 64
        }),
        Divider => json!({
            "lineStyle": "solid",
            "thickness": 1,
            "color": "#e5e7eb"
        }),
        Section => json!({
            "title": "Section",
            "backgroundColor": "#f9fafb",
            "padding": 48,
            "fullWidth": true
        }),
        Card => json!({
            "title": "Card title",
            "description": "Card description goes here.",
            "image": "/assets/card.jpg",
            "buttonText": "Learn more",
            "buttonLink": "#"
        }),

        // ====================================================================
        // Footer
        // ====================================================================
        Footer => json!({
            "companyName": "Company",
            "description": "Making the web a nicer place.",
            "links": ["Privacy", "Terms", "Contact"],
            "socialLinks": [
                { "platform": "twitter", "url": "https://twitter.com" },
                { "platform": "github", "url": "https://github.com" }
            ],
            "copyright": "© 2024 Company. All rights reserved."
        }),
        FooterSimple => json!({
            "text": "© 2024 Company",
            "links": ["Privacy", "Terms"]
        }),
        FooterColumns => json!({
            "columns": [
                { "title": "Product", "links": "Features, Pricing, Changelog" },
                { "title": "Company", "links": "About, Blog, Careers" }
            ],
            "newsletter": true,
            "copyright": "© 2024 Company"
        }),
        SocialLinks => json!({
            "links": [
                { "platform": "twitter", "url": "https://twitter.com" },
                { "platform": "linkedin", "url": "https://linkedin.com" }
            ],
            "iconSize": 24,
            "alignment": "center"
        }),
        Copyright => json!({
            "text": "© 2024 Company. All rights reserved.",
            "alignment": "center"
        }),
    }
}
