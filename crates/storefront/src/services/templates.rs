use super::types::*;
use std::time::Duration;

pub const INVALID_FORM_MESSAGE: &str = "Please fix the errors before submitting";

fn action(label: &str, target: &str, primary: bool) -> ModalAction {
    ModalAction {
        label: label.to_string(),
        target: target.to_string(),
        primary,
    }
}

/// Builds user-facing feedback from the injected site configuration
#[derive(Debug, Clone)]
pub struct ResponseTemplates {
    notifications: NotificationConfig,
}

impl ResponseTemplates {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            notifications: config.notifications.clone(),
        }
    }

    /// Success modal for a delivered submission
    pub fn success(&self, payload: &SubmissionPayload) -> SuccessModal {
        match payload.purpose {
            FormPurpose::Enquiry => self.enquiry_success(payload),
            FormPurpose::Contact => self.contact_success(),
        }
    }

    fn enquiry_success(&self, payload: &SubmissionPayload) -> SuccessModal {
        let name = payload.get("name").unwrap_or("there");
        let email = payload.get("email").unwrap_or("your email address");

        let (title, mut message) = match payload.kind.unwrap_or(EnquiryKind::General) {
            EnquiryKind::Coffee => (
                "Coffee Products Enquiry Received!",
                format!(
                    "Thank you {name}! We'll send our coffee catalog and wholesale pricing to {email} within 24 hours."
                ),
            ),
            EnquiryKind::Artwork => {
                let mut details = format!(
                    "Thank you {name}! Our art curator will contact you at {email} to discuss available sculptures and pricing."
                );
                if let Some(budget) = payload.get("budget") {
                    details.push_str(&format!(" Your indicated budget: R{budget}."));
                }
                ("Artwork Purchase Enquiry Received!", details)
            }
            EnquiryKind::Collaboration => (
                "Collaboration Request Received!",
                format!(
                    "Excellent {name}! We're excited about your collaboration idea. Our team will review your proposal and contact you at {email} within 48 hours."
                ),
            ),
            EnquiryKind::Event => (
                "Event Space Enquiry Received!",
                format!(
                    "Thank you {name}! We'll check our event calendar availability and get back to you at {email} within 24 hours."
                ),
            ),
            EnquiryKind::Wholesale => (
                "Wholesale Enquiry Received!",
                format!(
                    "Thank you for your wholesale interest {name}! Our sales team will contact you at {email} with pricing and minimum order information."
                ),
            ),
            EnquiryKind::General => (
                "Enquiry Received!",
                format!("Thank you {name}! We'll get back to you at {email} within 24 hours."),
            ),
        };

        if payload.newsletter() {
            message.push_str(" You have been subscribed to our newsletter.");
        }

        SuccessModal {
            title: title.to_string(),
            message,
            auto_close: Duration::from_millis(self.notifications.enquiry_modal_ms),
            actions: vec![
                action("Browse More Products", "services.html", false),
                action("Contact Us", "contact.html", true),
            ],
        }
    }

    fn contact_success(&self) -> SuccessModal {
        SuccessModal {
            title: "Message Sent Successfully!".to_string(),
            message: "Thank you for your message! We'll get back to you within 24 hours. Our team is looking forward to assisting you.".to_string(),
            auto_close: Duration::from_millis(self.notifications.contact_modal_ms),
            actions: vec![
                action("View Our Products", "services.html", false),
                action("Learn About Us", "about.html", true),
            ],
        }
    }

    /// Error toast for a failed submission; the form is left intact
    pub fn failure(&self, purpose: FormPurpose) -> Notification {
        let message = match purpose {
            FormPurpose::Enquiry => {
                "Sorry, there was an error submitting your enquiry. Please try again."
            }
            FormPurpose::Contact => {
                "Sorry, there was an error sending your message. Please try again."
            }
        };
        self.notification(NotificationLevel::Error, message)
    }

    /// Error toast shown when validation blocks a submission
    pub fn invalid(&self) -> Notification {
        self.notification(NotificationLevel::Error, INVALID_FORM_MESSAGE)
    }

    pub fn notification(&self, level: NotificationLevel, message: &str) -> Notification {
        Notification {
            level,
            message: message.to_string(),
            auto_dismiss: Duration::from_millis(self.notifications.auto_dismiss_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enquiry(fields: &[(&str, &str)]) -> SubmissionPayload {
        let form = FormDefinition::enquiry(&SiteConfig::default());
        let values = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SubmissionPayload::new(&form, values)
    }

    fn templates() -> ResponseTemplates {
        ResponseTemplates::new(&SiteConfig::default())
    }

    #[test]
    fn coffee_enquiry_mentions_catalog() {
        let modal = templates().success(&enquiry(&[
            (ENQUIRY_TYPE_FIELD, "coffee"),
            ("name", "Thandi"),
            ("email", "thandi@example.com"),
        ]));
        assert_eq!(modal.title, "Coffee Products Enquiry Received!");
        assert!(modal.message.contains("Thandi"));
        assert!(modal.message.contains("thandi@example.com"));
        assert_eq!(modal.auto_close, Duration::from_secs(8));
    }

    #[test]
    fn artwork_enquiry_appends_budget() {
        let modal = templates().success(&enquiry(&[
            (ENQUIRY_TYPE_FIELD, "artwork"),
            ("name", "Sam"),
            ("email", "sam@example.com"),
            ("budget", "15000"),
        ]));
        assert!(modal.message.ends_with("Your indicated budget: R15000."));
    }

    #[test]
    fn artwork_enquiry_without_budget_omits_it() {
        let modal = templates().success(&enquiry(&[(ENQUIRY_TYPE_FIELD, "artwork")]));
        assert!(!modal.message.contains("budget"));
    }

    #[test]
    fn unknown_kind_uses_general_template() {
        let modal = templates().success(&enquiry(&[(ENQUIRY_TYPE_FIELD, "tour")]));
        assert_eq!(modal.title, "Enquiry Received!");
    }

    #[test]
    fn each_kind_has_distinct_title() {
        let titles: std::collections::HashSet<_> =
            ["coffee", "artwork", "collaboration", "event", "wholesale", "other"]
                .iter()
                .map(|kind| templates().success(&enquiry(&[(ENQUIRY_TYPE_FIELD, *kind)])).title)
                .collect();
        assert_eq!(titles.len(), 6);
    }

    #[test]
    fn newsletter_opt_in_is_acknowledged() {
        let modal = templates().success(&enquiry(&[
            (ENQUIRY_TYPE_FIELD, "event"),
            ("newsletter", "on"),
        ]));
        assert!(modal
            .message
            .ends_with("You have been subscribed to our newsletter."));
    }

    #[test]
    fn enquiry_modal_offers_contact_as_primary() {
        let modal = templates().success(&enquiry(&[]));
        let primary: Vec<_> = modal.actions.iter().filter(|a| a.primary).collect();
        assert_eq!(primary.len(), 1);
        assert_eq!(primary[0].target, "contact.html");
    }

    #[test]
    fn contact_success_is_generic() {
        let form = FormDefinition::contact(&SiteConfig::default());
        let payload = SubmissionPayload::new(&form, FormValues::new());
        let modal = templates().success(&payload);
        assert_eq!(modal.title, "Message Sent Successfully!");
        assert_eq!(modal.auto_close, Duration::from_secs(6));
        assert_eq!(modal.actions.len(), 2);
    }

    #[test]
    fn failure_notifications_differ_by_form() {
        let t = templates();
        let enquiry = t.failure(FormPurpose::Enquiry);
        let contact = t.failure(FormPurpose::Contact);
        assert_eq!(enquiry.level, NotificationLevel::Error);
        assert!(enquiry.message.contains("enquiry"));
        assert!(contact.message.contains("message"));
        assert_eq!(contact.auto_dismiss, Duration::from_secs(5));
    }
}
