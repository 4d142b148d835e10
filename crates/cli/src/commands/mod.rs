//! Product commands.
//!
//! Each command goes through the same dialog and controller a graphical
//! front end would use, so validation and notices behave identically.

use clap::Args;
use product_dashboard::{
    ApiError, ConfigError, DashboardConfig, DashboardError, HttpProductApi, LoginForm,
    ProductDialog, ProductListController, SessionStore, authenticate,
};
use product_dashboard_core::ProductId;
use thiserror::Error;
use tracing::{info, instrument};

/// Controller type every command runs against.
pub type Dashboard = ProductListController<HttpProductApi>;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("Client error: {0}")]
    Client(#[from] ApiError),

    /// A dashboard operation failed.
    #[error(transparent)]
    Dashboard(#[from] DashboardError),

    /// No product with this ID in the loaded list.
    #[error("Product not found: {0}")]
    UnknownProduct(ProductId),
}

impl CliError {
    /// Message shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Dashboard(e) => e.user_message(),
            Self::Config(ConfigError::MissingEnvVar(var)) if var.starts_with("DASHBOARD_") => {
                "Please fill in all fields".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Product fields given on the command line.
#[derive(Debug, Args)]
pub struct ProductArgs {
    /// Product name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Unit price, e.g. 19.99
    #[arg(short, long)]
    pub price: Option<String>,

    /// Free-form description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Color label (defaults to Red on create)
    #[arg(short, long)]
    pub color: Option<String>,
}

impl ProductArgs {
    fn apply(self, dialog: &mut ProductDialog) {
        let draft = dialog.draft_mut();
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(price) = self.price {
            draft.price = price;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(color) = self.color {
            draft.color = color;
        }
    }
}

/// Log in with the configured credentials and load the product list.
///
/// # Errors
///
/// Returns an error if credentials are missing, login fails, or the list
/// cannot be loaded.
#[instrument(skip_all, fields(base_url = %config.api_base_url))]
pub async fn connect(config: &DashboardConfig) -> Result<Dashboard, CliError> {
    let credentials = config
        .credentials
        .clone()
        .ok_or_else(|| ConfigError::MissingEnvVar("DASHBOARD_USERNAME".to_string()))?;

    let api = HttpProductApi::new(&config.api_base_url)?;
    let session = SessionStore::new();
    authenticate(&api, &session, &LoginForm::from(credentials)).await?;

    let mut dashboard = ProductListController::new(api, session, config);
    dashboard.refresh().await?;
    Ok(dashboard)
}

/// Create a product from `fields`.
///
/// # Errors
///
/// Returns an error if validation or the backend call fails.
pub async fn create(dashboard: &mut Dashboard, fields: ProductArgs) -> Result<(), CliError> {
    let mut dialog = ProductDialog::new();
    dialog.open_create();
    fields.apply(&mut dialog);

    let id = dialog.submit(dashboard).await?;
    info!(product_id = %id, "Created");
    Ok(())
}

/// Overwrite the given fields of product `id`, keeping the rest.
///
/// # Errors
///
/// Returns an error if the product is not in the list, or validation or the
/// backend call fails.
pub async fn update(dashboard: &mut Dashboard, id: &str, fields: ProductArgs) -> Result<(), CliError> {
    let id = parse_id(id);
    let product = dashboard
        .find(&id)
        .cloned()
        .ok_or(CliError::UnknownProduct(id))?;

    let mut dialog = ProductDialog::new();
    dialog.open_edit(&product);
    fields.apply(&mut dialog);

    dialog.submit(dashboard).await?;
    Ok(())
}

/// Delete product `id`.
///
/// # Errors
///
/// Returns an error if the backend call fails.
pub async fn delete(dashboard: &mut Dashboard, id: &str) -> Result<(), CliError> {
    dashboard.delete(&parse_id(id)).await?;
    Ok(())
}

fn parse_id(id: &str) -> ProductId {
    match id.parse() {
        Ok(id) => id,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use product_dashboard::ProductDraft;

    use super::*;

    #[test]
    fn test_apply_overrides_only_given_fields() {
        let mut dialog = ProductDialog::new();
        dialog.open_create();
        *dialog.draft_mut() = ProductDraft {
            name: "Lamp".to_string(),
            price: "10".to_string(),
            description: "Old".to_string(),
            color: "Blue".to_string(),
        };

        ProductArgs {
            name: None,
            price: Some("12.5".to_string()),
            description: None,
            color: Some(String::new()),
        }
        .apply(&mut dialog);

        assert_eq!(dialog.draft().name, "Lamp");
        assert_eq!(dialog.draft().price, "12.5");
        assert_eq!(dialog.draft().description, "Old");
        assert_eq!(dialog.draft().color, "");
    }

    #[test]
    fn test_parse_id_keeps_numeric_shape() {
        assert_eq!(parse_id("42"), ProductId::from(42));
        assert_eq!(parse_id("p-42"), ProductId::from("p-42"));
    }

    #[test]
    fn test_missing_credentials_message() {
        let err = CliError::Config(ConfigError::MissingEnvVar("DASHBOARD_USERNAME".to_string()));
        assert_eq!(err.user_message(), "Please fill in all fields");
    }
}
