//! Component registry
//!
//! The registry is the static catalog of component types a page can be built
//! from. Each `ComponentKind` maps to a `KindDescriptor` that pairs its
//! palette category and label with a defaults factory and a field schema.
//! Nothing here holds state: every call hands back freshly built data.

use crate::ComponentData;
use crate::catalog;
use crate::schema::{FieldSpec, infer_fields};
use heck::ToTitleCase;
use pagesmith_core::{BuilderError, Category};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::OnceLock;

// ============================================================================
// ComponentKind
// ============================================================================

macro_rules! component_kinds {
    ($($variant:ident => $name:literal, $category:ident;)+) => {
        /// Closed catalog of component types
        ///
        /// Serialized as the kebab-case type identifier (`"hero"`, `"pricing-table"`).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ComponentKind {
            $($variant,)+
        }

        impl ComponentKind {
            /// Type identifier used in ids and persisted content
            pub fn name(&self) -> &'static str {
                match self {
                    $(ComponentKind::$variant => $name,)+
                }
            }

            /// Palette category
            pub fn category(&self) -> Category {
                match self {
                    $(ComponentKind::$variant => Category::$category,)+
                }
            }

            /// Every kind, in palette order
            pub fn all() -> &'static [ComponentKind] {
                &[$(ComponentKind::$variant,)+]
            }
        }
    };
}

component_kinds! {
    // Navigation
    Navbar => "navbar", Navigation;
    NavbarCentered => "navbar-centered", Navigation;
    MegaMenu => "mega-menu", Navigation;
    SidebarNav => "sidebar-nav", Navigation;
    Breadcrumb => "breadcrumb", Navigation;
    AnnouncementBar => "announcement-bar", Navigation;
    // Hero
    Hero => "hero", Hero;
    HeroSplit => "hero-split", Hero;
    HeroVideo => "hero-video", Hero;
    HeroCentered => "hero-centered", Hero;
    HeroImage => "hero-image", Hero;
    HeroGradient => "hero-gradient", Hero;
    // Content
    Heading => "heading", Content;
    TextBlock => "text-block", Content;
    RichText => "rich-text", Content;
    Blockquote => "blockquote", Content;
    Stats => "stats", Content;
    Timeline => "timeline", Content;
    Faq => "faq", Content;
    Accordion => "accordion", Content;
    Tabs => "tabs", Content;
    Cta => "cta", Content;
    About => "about", Content;
    Team => "team", Content;
    BlogGrid => "blog-grid", Content;
    Countdown => "countdown", Content;
    // Features
    Features => "features", Features;
    FeatureGrid => "feature-grid", Features;
    FeatureList => "feature-list", Features;
    FeatureAlternating => "feature-alternating", Features;
    Services => "services", Features;
    Steps => "steps", Features;
    ComparisonTable => "comparison-table", Features;
    Integrations => "integrations", Features;
    // Commerce
    Pricing => "pricing", Commerce;
    PricingTable => "pricing-table", Commerce;
    ProductCard => "product-card", Commerce;
    ProductGrid => "product-grid", Commerce;
    CartSummary => "cart-summary", Commerce;
    Checkout => "checkout", Commerce;
    PromoBanner => "promo-banner", Commerce;
    // Social proof
    Testimonials => "testimonials", SocialProof;
    TestimonialSlider => "testimonial-slider", SocialProof;
    LogoCloud => "logo-cloud", SocialProof;
    Reviews => "reviews", SocialProof;
    CaseStudy => "case-study", SocialProof;
    Badges => "badges", SocialProof;
    // Forms
    ContactForm => "contact-form", Forms;
    Newsletter => "newsletter", Forms;
    SignupForm => "signup-form", Forms;
    LoginForm => "login-form", Forms;
    SearchBar => "search-bar", Forms;
    Survey => "survey", Forms;
    BookingForm => "booking-form", Forms;
    // Media
    Image => "image", Media;
    Gallery => "gallery", Media;
    Video => "video", Media;
    Carousel => "carousel", Media;
    Map => "map", Media;
    Audio => "audio", Media;
    Embed => "embed", Media;
    // Layout
    Container => "container", Layout;
    Columns => "columns", Layout;
    Grid => "grid", Layout;
    Spacer => "spacer", Layout;
    Divider => "divider", Layout;
    Section => "section", Layout;
    Card => "card", Layout;
    // Footer
    Footer => "footer", Footer;
    FooterSimple => "footer-simple", Footer;
    FooterColumns => "footer-columns", Footer;
    SocialLinks => "social-links", Footer;
    Copyright => "copyright", Footer;
}

impl ComponentKind {
    /// Look up a kind by its type identifier
    pub fn from_name(name: &str) -> Option<ComponentKind> {
        ComponentKind::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
    }

    /// Human readable label for the palette
    pub fn label(&self) -> String {
        self.name().to_title_case()
    }

    /// Fresh default data for a new component of this kind
    pub fn default_data(&self) -> ComponentData {
        match catalog::defaults(*self) {
            serde_json::Value::Object(map) => map,
            _ => ComponentData::new(),
        }
    }

    /// Descriptor pairing this kind's defaults factory with its field schema
    pub fn descriptor(&self) -> &'static KindDescriptor {
        // Enum discriminants follow declaration order, which is also `all()` order.
        &descriptors()[*self as usize]
    }

    /// Field schema for the property editor
    pub fn fields(&self) -> &'static [FieldSpec] {
        &self.descriptor().fields
    }

    /// Look up a single field spec
    pub fn field(&self, key: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.key == key)
    }

    /// Kinds belonging to a palette category
    pub fn by_category(category: Category) -> Vec<ComponentKind> {
        ComponentKind::all()
            .iter()
            .copied()
            .filter(|kind| kind.category() == category)
            .collect()
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ComponentKind {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentKind::from_name(s.trim())
            .ok_or_else(|| BuilderError::UnknownComponentType(s.to_string()))
    }
}

impl Serialize for ComponentKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for ComponentKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        ComponentKind::from_name(&name).ok_or_else(|| {
            serde::de::Error::custom(format!("unknown component type '{}'", name))
        })
    }
}

// ============================================================================
// KindDescriptor
// ============================================================================

/// Static description of one component kind
#[derive(Debug, Clone)]
pub struct KindDescriptor {
    /// The kind described
    pub kind: ComponentKind,
    /// Palette category
    pub category: Category,
    /// Palette label
    pub label: String,
    /// Editable fields, in default-data order
    pub fields: Vec<FieldSpec>,
}

impl KindDescriptor {
    fn build(kind: ComponentKind) -> Self {
        Self {
            kind,
            category: kind.category(),
            label: kind.label(),
            fields: infer_fields(&kind.default_data()),
        }
    }

    /// Defaults factory for this kind
    pub fn create_default(&self) -> ComponentData {
        self.kind.default_data()
    }
}

fn descriptors() -> &'static [KindDescriptor] {
    static DESCRIPTORS: OnceLock<Vec<KindDescriptor>> = OnceLock::new();
    DESCRIPTORS.get_or_init(|| {
        ComponentKind::all()
            .iter()
            .copied()
            .map(KindDescriptor::build)
            .collect()
    })
}

// ============================================================================
// String Lookup
// ============================================================================

/// Default data for a type name
///
/// Unknown type names yield an empty object rather than an error; the canvas
/// shows those with a generic placeholder.
pub fn create_default(type_name: &str) -> ComponentData {
    ComponentKind::from_name(type_name)
        .map(|kind| kind.default_data())
        .unwrap_or_default()
}

// ============================================================================
// Tests
// ============================================================================
