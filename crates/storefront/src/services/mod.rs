pub mod config;
pub mod search;
pub mod submission;
pub mod templates;
pub mod types;
pub mod validator;

pub use config::ConfigService;
pub use search::{filter, Catalog, EmptyState, IndicatorChange, SearchService};
pub use submission::{
    AnalyticsSink, FeedbackSink, NoopAnalytics, NullFeedback, SimulatedTransport,
    SubmissionCoordinator, SubmissionState, SubmitControl, SubmitOutcome, TracingAnalytics,
    Transport, UiEvent,
};
pub use templates::ResponseTemplates;
pub use types::{
    EmptyStateSignal, EnquiryKind, FieldKind, FieldSpec, FilterOutcome, FormDefinition,
    FormPurpose, FormValues, Location, ModalAction, Notification, NotificationLevel,
    ProductCatalog, SearchQuery, SearchableItem, SiteConfig, SubmissionPayload, SuccessModal,
    ValidationResult, ENQUIRY_TYPE_FIELD,
};
pub use validator::{validate, validate_all, validate_form};
