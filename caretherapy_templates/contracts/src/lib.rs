use serde::Serialize;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateService: Send + Sync + 'static {
    /// Render the given template.
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<String>;
}

#[cfg(feature = "mock")]
impl MockTemplateService {
    pub fn with_render<T: Template + Send + PartialEq + std::fmt::Debug + 'static>(
        mut self,
        template: T,
        result: String,
    ) -> Self {
        self.expect_render()
            .once()
            .with(mockall::predicate::eq(template))
            .return_once(|_| Ok(result));
        self
    }
}

pub trait Template: Serialize {
    const NAME: &'static str;
    const TEMPLATE: &'static str;
}

macro_rules! templates {
    ($( $ident:ident ( $path:literal ), )* ) => {
        $(
            impl Template for $ident {
                const NAME: &'static str = stringify!($ident);
                const TEMPLATE: &'static str = include_str!(concat!("../templates/", $path));
            }
        )*

        pub const TEMPLATES: &[(&str, &str)] = &[
            $( ($ident::NAME, $ident::TEMPLATE) ),*
        ];
    };
}

templates! {
    BusinessNotificationTemplate("business_notification.html"),
    UserConfirmationTemplate("user_confirmation.html"),
}

/// Data for the email notifying the business of a new contact form
/// submission. Optional submission fields arrive pre-rendered
/// (`Not provided` / `Not specified`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessNotificationTemplate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub preferred_contact: String,
    pub message: String,
    pub submitted_at: String,
    pub client_key: String,
}

/// Data for the confirmation email sent back to the submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserConfirmationTemplate {
    pub name: String,
    pub message: String,
    pub business_name: String,
    pub business_phone: String,
    pub business_email: String,
}
