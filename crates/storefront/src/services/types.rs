use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

/// Current values of a form, keyed by field name.
///
/// A field of the form's definition that is missing from the map has never
/// been filled in and is validated as empty on submit.
pub type FormValues = BTreeMap<String, String>;

/// Input control kind of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Textarea,
    Select,
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Tel => "tel",
            FieldKind::Textarea => "textarea",
            FieldKind::Select => "select",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for FieldKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(FieldKind::Text),
            "email" => Ok(FieldKind::Email),
            "tel" | "phone" => Ok(FieldKind::Tel),
            "textarea" => Ok(FieldKind::Textarea),
            "select" => Ok(FieldKind::Select),
            _ => Err(anyhow::anyhow!("Invalid field kind: {}", s)),
        }
    }
}

/// Static description of one form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: None,
            kind,
            required: false,
            min_length: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Name used in user-facing messages: the label when set, else the field name
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Phone rules apply to `tel` inputs and to any field named `phone`
    pub fn is_phone(&self) -> bool {
        self.kind == FieldKind::Tel || self.name == "phone"
    }
}

/// Verdict for a single field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// One card on the catalog page, as seen by the search filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchableItem {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
}

impl SearchableItem {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            price: None,
            tags: BTreeSet::new(),
        }
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }
}

/// Normalized search text: trimmed and lower-cased. Empty means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for SearchQuery {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Instruction to the UI layer about the "no results" indicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyStateSignal {
    /// Nothing matched a non-empty query; carries the query for the message
    Show { query: String },
    /// Results exist or no filter is active
    Clear,
}

/// Result of filtering a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Visible item ids, in original catalog order
    pub visible_ids: Vec<String>,
    pub match_count: usize,
    pub signal: EmptyStateSignal,
}

impl FilterOutcome {
    pub fn is_visible(&self, id: &str) -> bool {
        self.visible_ids.iter().any(|v| v == id)
    }
}

/// Which submission flow a form belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormPurpose {
    Enquiry,
    Contact,
}

impl std::fmt::Display for FormPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormPurpose::Enquiry => write!(f, "enquiry"),
            FormPurpose::Contact => write!(f, "contact"),
        }
    }
}

impl std::str::FromStr for FormPurpose {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "enquiry" | "enquiryform" => Ok(FormPurpose::Enquiry),
            "contact" | "contactform" => Ok(FormPurpose::Contact),
            _ => Err(anyhow::anyhow!("Invalid form: {}", s)),
        }
    }
}

/// Enquiry category, selects the response template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnquiryKind {
    Coffee,
    Artwork,
    Collaboration,
    Event,
    Wholesale,
    General,
}

impl EnquiryKind {
    /// Map a select value to a kind. Unknown values fall back to `General`.
    pub fn from_value(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "coffee" => EnquiryKind::Coffee,
            "artwork" => EnquiryKind::Artwork,
            "collaboration" => EnquiryKind::Collaboration,
            "event" => EnquiryKind::Event,
            "wholesale" => EnquiryKind::Wholesale,
            _ => EnquiryKind::General,
        }
    }
}

impl std::fmt::Display for EnquiryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EnquiryKind::Coffee => "coffee",
            EnquiryKind::Artwork => "artwork",
            EnquiryKind::Collaboration => "collaboration",
            EnquiryKind::Event => "event",
            EnquiryKind::Wholesale => "wholesale",
            EnquiryKind::General => "general",
        };
        write!(f, "{}", s)
    }
}

/// Data handed to the transport once every field is valid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub reference: String,
    pub form_id: String,
    pub purpose: FormPurpose,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<EnquiryKind>,
    pub fields: FormValues,
    pub submitted_at: DateTime<Utc>,
    pub source: String,
}

impl SubmissionPayload {
    /// Generate a short reference using a reduced, unambiguous alphabet
    pub fn generate_reference() -> String {
        const ALPHABET: &[char] = &[
            '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'j',
            'k', 'm', 'n', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
        ];
        nanoid::nanoid!(10, ALPHABET)
    }

    pub fn new(form: &FormDefinition, fields: FormValues) -> Self {
        let kind = match form.purpose {
            FormPurpose::Enquiry => Some(
                fields
                    .get(ENQUIRY_TYPE_FIELD)
                    .map(|v| EnquiryKind::from_value(v))
                    .unwrap_or(EnquiryKind::General),
            ),
            FormPurpose::Contact => None,
        };
        Self {
            reference: Self::generate_reference(),
            form_id: form.id.clone(),
            purpose: form.purpose,
            kind,
            fields,
            submitted_at: Utc::now(),
            source: "website-form".to_string(),
        }
    }

    /// Trimmed, non-empty value of a field
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Checkbox-style opt-in: the browser submits "on" when ticked
    pub fn newsletter(&self) -> bool {
        self.get("newsletter")
            .is_some_and(|v| v.eq_ignore_ascii_case("on") || v.eq_ignore_ascii_case("true"))
    }
}

/// Field that selects the enquiry template
pub const ENQUIRY_TYPE_FIELD: &str = "enquiry-type";

/// A form and the behaviour of its submit control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDefinition {
    pub id: String,
    pub purpose: FormPurpose,
    pub fields: Vec<FieldSpec>,
    pub idle_label: String,
    pub busy_label: String,
    pub submit_delay: Duration,
    pub conversion_event: String,
}

impl FormDefinition {
    /// Multi-purpose enquiry form
    pub fn enquiry(config: &SiteConfig) -> Self {
        Self {
            id: "enquiryForm".to_string(),
            purpose: FormPurpose::Enquiry,
            fields: vec![
                FieldSpec::new(ENQUIRY_TYPE_FIELD, FieldKind::Select)
                    .with_label("Enquiry type")
                    .required(),
                FieldSpec::new("name", FieldKind::Text)
                    .with_label("Full name")
                    .required(),
                FieldSpec::new("email", FieldKind::Email)
                    .with_label("Email address")
                    .required(),
                FieldSpec::new("phone", FieldKind::Tel).with_label("Phone number"),
                FieldSpec::new("budget", FieldKind::Text).with_label("Budget"),
                FieldSpec::new("urgency", FieldKind::Select).with_label("Urgency"),
                FieldSpec::new("message", FieldKind::Textarea)
                    .with_label("Message")
                    .required(),
                FieldSpec::new("newsletter", FieldKind::Select),
            ],
            idle_label: "Submit Enquiry".to_string(),
            busy_label: "Processing...".to_string(),
            submit_delay: config.submission.enquiry_delay(),
            conversion_event: "enquiry_submission".to_string(),
        }
    }

    /// Simple contact form
    pub fn contact(config: &SiteConfig) -> Self {
        Self {
            id: "contactForm".to_string(),
            purpose: FormPurpose::Contact,
            fields: vec![
                FieldSpec::new("name", FieldKind::Text)
                    .with_label("Full name")
                    .required(),
                FieldSpec::new("email", FieldKind::Email)
                    .with_label("Email address")
                    .required(),
                FieldSpec::new("subject", FieldKind::Text)
                    .with_label("Subject")
                    .required(),
                FieldSpec::new("message", FieldKind::Textarea)
                    .with_label("Message")
                    .required(),
            ],
            idle_label: "Send Message".to_string(),
            busy_label: "Sending...".to_string(),
            submit_delay: config.submission.contact_delay(),
            conversion_event: "contact_submission".to_string(),
        }
    }

    pub fn for_purpose(purpose: FormPurpose, config: &SiteConfig) -> Self {
        match purpose {
            FormPurpose::Enquiry => Self::enquiry(config),
            FormPurpose::Contact => Self::contact(config),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Severity of a toast notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl std::fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NotificationLevel::Info => "info",
            NotificationLevel::Success => "success",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// Dismissible toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub auto_dismiss: Duration,
}

/// Button rendered inside a success modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalAction {
    pub label: String,
    pub target: String,
    pub primary: bool,
}

/// Rich success dialog with auto-close and follow-up actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessModal {
    pub title: String,
    pub message: String,
    pub auto_close: Duration,
    pub actions: Vec<ModalAction>,
}

/// A physical venue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub address: String,
    pub coords: String,
    pub phone: String,
    pub hours: String,
}

/// Product names per category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCatalog {
    #[serde(default)]
    pub coffee: Vec<String>,
    #[serde(default)]
    pub beans: Vec<String>,
    #[serde(default)]
    pub sculptures: Vec<String>,
    #[serde(default)]
    pub merchandise: Vec<String>,
}

impl ProductCatalog {
    /// Categories paired with their products, in display order
    pub fn categories(&self) -> [(&'static str, &[String]); 4] {
        [
            ("coffee", self.coffee.as_slice()),
            ("beans", self.beans.as_slice()),
            ("sculptures", self.sculptures.as_slice()),
            ("merchandise", self.merchandise.as_slice()),
        ]
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self {
            coffee: strings(&["Signature Latte", "Artisan Pour Over", "Cold Brew Tonic"]),
            beans: strings(&[
                "Ethiopian Yirgacheffe",
                "Colombian Supremo",
                "House Signature Blend",
            ]),
            sculptures: strings(&["Reclaimed Wood Form", "Geometric Ceramic", "Steel Abstract"]),
            merchandise: strings(&["Artisan Ceramic Mug", "Canvas Tote Bag", "Gift Card"]),
        }
    }
}

/// Search input behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub debounce_ms: u64,
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: 300 }
    }
}

/// Artificial latencies standing in for the network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionConfig {
    pub enquiry_delay_ms: u64,
    pub contact_delay_ms: u64,
    pub transport_delay_ms: u64,
}

impl SubmissionConfig {
    pub fn enquiry_delay(&self) -> Duration {
        Duration::from_millis(self.enquiry_delay_ms)
    }

    pub fn contact_delay(&self) -> Duration {
        Duration::from_millis(self.contact_delay_ms)
    }

    pub fn transport_delay(&self) -> Duration {
        Duration::from_millis(self.transport_delay_ms)
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            enquiry_delay_ms: 2000,
            contact_delay_ms: 1500,
            transport_delay_ms: 1000,
        }
    }
}

/// Display durations for notifications and modals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub auto_dismiss_ms: u64,
    pub enquiry_modal_ms: u64,
    pub contact_modal_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            auto_dismiss_ms: 5000,
            enquiry_modal_ms: 8000,
            contact_modal_ms: 6000,
        }
    }
}

/// Offline cache manifest settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfflineConfig {
    pub cache_name: String,
    pub urls: Vec<String>,
}

impl Default for OfflineConfig {
    fn default() -> Self {
        Self {
            cache_name: "brew-sculpt-v1.0.0".to_string(),
            urls: strings(&[
                "/",
                "/index.html",
                "/about.html",
                "/services.html",
                "/enquiry.html",
                "/contact.html",
                "/css/style.css",
                "/js/script.js",
                "/images/logo.png",
            ]),
        }
    }
}

/// Read-only site configuration, injected into the components that need it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub contact_email: String,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub products: ProductCatalog,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub offline: OfflineConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            contact_email: "hello@brewandsculpt.com".to_string(),
            locations: vec![
                Location {
                    name: "Downtown Café".to_string(),
                    address: "123 Artisan Street, City Center, Cape Town, 8001".to_string(),
                    coords: "-33.9285,18.4231".to_string(),
                    phone: "+27 (0)21 123 4567".to_string(),
                    hours: "Mon-Fri: 7:00 AM - 6:00 PM".to_string(),
                },
                Location {
                    name: "Riverside Gallery".to_string(),
                    address: "456 Creative Lane, Riverside, Cape Town, 8001".to_string(),
                    coords: "-33.9185,18.4331".to_string(),
                    phone: "+27 (0)21 234 5678".to_string(),
                    hours: "Tue-Sun: 9:00 AM - 5:00 PM".to_string(),
                },
            ],
            products: ProductCatalog::default(),
            search: SearchConfig::default(),
            submission: SubmissionConfig::default(),
            notifications: NotificationConfig::default(),
            offline: OfflineConfig::default(),
        }
    }
}
