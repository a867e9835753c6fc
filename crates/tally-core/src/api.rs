//! Expense sources
//!
//! The analytics engine never fetches anything itself. Callers load a
//! [`UserProfile`] through an [`ExpenseSource`] and hand its expense list to
//! the engine. Two sources exist:
//!
//! - [`ApiClient`] - the expense backend over HTTP, authenticated with an
//!   explicitly passed [`Session`]
//! - [`FileSource`] - a JSON document on disk (a `/getUser` response, a bare
//!   user object, or a bare expense array)

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Expense, ExpenseUpdate, NewExpense, Session, UserProfile};

/// Anything that can produce the current user's expenses
#[async_trait]
pub trait ExpenseSource: Send + Sync {
    async fn fetch_profile(&self) -> Result<UserProfile>;
}

/// HTTP client for the expense backend
#[derive(Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
    session: Session,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    user: UserProfile,
}

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    result: Expense,
}

#[derive(Debug, Deserialize)]
struct UpdatedResponse {
    expense: Expense,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

impl ApiClient {
    /// Create a client with the default 30 second timeout
    pub fn new(base_url: &str, session: Session) -> Result<Self> {
        Self::with_timeout(base_url, session, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: &str, session: Session, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /getUser`
    pub async fn get_user(&self) -> Result<UserProfile> {
        let response = self
            .http_client
            .get(format!("{}/getUser", self.base_url))
            .bearer_auth(self.session.token())
            .send()
            .await?;

        let body: UserResponse = check_status(response).await?.json().await?;
        debug!(
            user = %body.user.username,
            expenses = body.user.expenses.len(),
            "Fetched user profile"
        );
        Ok(body.user)
    }

    /// `POST /expenses`
    pub async fn create_expense(&self, expense: &NewExpense) -> Result<Expense> {
        if expense.category.trim().is_empty() {
            return Err(Error::InvalidData("Category is required".into()));
        }
        if !(expense.amount > 0.0) {
            return Err(Error::InvalidData("Amount must be positive".into()));
        }

        let response = self
            .http_client
            .post(format!("{}/expenses", self.base_url))
            .bearer_auth(self.session.token())
            .json(expense)
            .send()
            .await?;

        let body: CreatedResponse = check_status(response).await?.json().await?;
        debug!(id = %body.result.id, "Created expense");
        Ok(body.result)
    }

    /// `PUT /expenses/{id}`
    pub async fn update_expense(&self, id: &str, update: &ExpenseUpdate) -> Result<Expense> {
        if update.is_empty() {
            return Err(Error::InvalidData("Nothing to update".into()));
        }

        let response = self
            .http_client
            .put(format!("{}/expenses/{}", self.base_url, id))
            .bearer_auth(self.session.token())
            .json(update)
            .send()
            .await?;

        let body: UpdatedResponse = check_status(response).await?.json().await?;
        debug!(id, "Updated expense");
        Ok(body.expense)
    }

    /// `DELETE /expenses/{id}`
    pub async fn delete_expense(&self, id: &str) -> Result<()> {
        let response = self
            .http_client
            .delete(format!("{}/expenses/{}", self.base_url, id))
            .bearer_auth(self.session.token())
            .send()
            .await?;

        check_status(response).await?;
        debug!(id, "Deleted expense");
        Ok(())
    }
}

#[async_trait]
impl ExpenseSource for ApiClient {
    async fn fetch_profile(&self) -> Result<UserProfile> {
        self.get_user().await
    }
}

/// Turn a non-success response into [`Error::Api`], keeping the backend's
/// `message` when it sent one
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Something went wrong")
                .to_string()
        });

    Err(Error::Api {
        status: status.as_u16(),
        message,
    })
}

/// JSON file on disk
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parse a document in any accepted layout
    ///
    /// The layout is picked from the top-level shape: an array is a bare
    /// expense list, an object with `user` is a `/getUser` response, and
    /// anything else must be a user object. A malformed record fails the
    /// whole document.
    pub fn parse(content: &str) -> Result<UserProfile> {
        let mut doc: Value = serde_json::from_str(content)?;

        if doc.is_array() {
            let expenses: Vec<Expense> = serde_json::from_value(doc)?;
            return Ok(UserProfile {
                username: String::new(),
                currency: None,
                role: None,
                expenses,
            });
        }

        if let Some(user) = doc.get_mut("user").map(Value::take) {
            return Ok(serde_json::from_value(user)?);
        }

        Ok(serde_json::from_value(doc)?)
    }
}

#[async_trait]
impl ExpenseSource for FileSource {
    async fn fetch_profile(&self) -> Result<UserProfile> {
        let content = std::fs::read_to_string(&self.path)?;
        let profile = Self::parse(&content)?;
        debug!(
            path = %self.path.display(),
            expenses = profile.expenses.len(),
            "Loaded expenses from file"
        );
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockExpenseBackend;
    use chrono::NaiveDate;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:5000/", Session::new("t")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_file_source_parses_all_layouts() {
        let wrapped = r#"{"user": {"username": "sara", "expenses": [
            {"_id": "1", "amount": 5, "category": "Food", "date": "2024-03-01"}
        ]}}"#;
        let profile = FileSource::parse(wrapped).unwrap();
        assert_eq!(profile.username, "sara");
        assert_eq!(profile.expenses.len(), 1);

        let bare = r#"{"username": "omar", "currency": "EGP", "expenses": []}"#;
        let profile = FileSource::parse(bare).unwrap();
        assert_eq!(profile.username, "omar");
        assert_eq!(profile.currency.as_deref(), Some("EGP"));

        let list = r#"[{"id": "1", "amount": 5, "category": "Food"}]"#;
        let profile = FileSource::parse(list).unwrap();
        assert!(profile.username.is_empty());
        assert_eq!(profile.expenses[0].category, "Food");
    }

    #[test]
    fn test_file_source_malformed_record_is_an_error() {
        let wrapped = r#"{"user": {"username": "sara", "expenses": [
            {"_id": "1", "amount": 5, "category": "Food", "date": "2024-03-01"},
            {"_id": "2", "amount": 50, "category": "Food", "project": 7, "date": "2024-03-02"}
        ]}}"#;
        assert!(matches!(FileSource::parse(wrapped), Err(Error::Json(_))));

        let list = r#"[{"_id": "1", "amount": "lots", "category": "Food"}]"#;
        assert!(matches!(FileSource::parse(list), Err(Error::Json(_))));

        let bare = r#"{"username": "omar", "expenses": [{"_id": "1", "category": "Food"}]}"#;
        assert!(matches!(FileSource::parse(bare), Err(Error::Json(_))));
    }

    #[test]
    fn test_file_source_rejects_garbage() {
        assert!(matches!(FileSource::parse("42"), Err(Error::Json(_))));
    }

    #[tokio::test]
    async fn test_create_expense_validates_locally() {
        let client = ApiClient::new("http://127.0.0.1:9", Session::new("t")).unwrap();
        let bad = NewExpense {
            amount: 0.0,
            category: "Food".into(),
            project: None,
            description: None,
            date: None,
        };
        assert!(matches!(
            client.create_expense(&bad).await,
            Err(Error::InvalidData(_))
        ));

        let empty = ExpenseUpdate::default();
        assert!(matches!(
            client.update_expense("1", &empty).await,
            Err(Error::InvalidData(_))
        ));
    }

    #[tokio::test]
    async fn test_api_round_trip_against_mock_backend() {
        let seed = vec![
            Expense::new("1", 100.0, "Food", NaiveDate::from_ymd_opt(2024, 3, 1)),
            Expense::new("2", 50.0, "Food", NaiveDate::from_ymd_opt(2024, 3, 15)),
            Expense::new("3", 200.0, "Rent", NaiveDate::from_ymd_opt(2024, 3, 1)),
        ];
        let backend = MockExpenseBackend::start("secret", "sara", seed).await;
        let client = ApiClient::new(&backend.url(), Session::new("secret")).unwrap();

        let profile = client.fetch_profile().await.unwrap();
        assert_eq!(profile.username, "sara");
        assert_eq!(profile.expenses.len(), 3);

        let created = client
            .create_expense(&NewExpense {
                amount: 42.5,
                category: "Books".into(),
                project: Some("Study".into()),
                description: Some("Rust book".into()),
                date: NaiveDate::from_ymd_opt(2024, 3, 18),
            })
            .await
            .unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(created.project.as_deref(), Some("Study"));

        let updated = client
            .update_expense(
                &created.id,
                &ExpenseUpdate {
                    amount: Some(45.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.amount, 45.0);
        assert_eq!(updated.category, "Books");

        client.delete_expense("1").await.unwrap();

        let stored = backend.expenses();
        assert_eq!(stored.len(), 3);
        assert!(stored.iter().all(|e| e.id != "1"));
    }

    #[tokio::test]
    async fn test_api_errors_surface_backend_message() {
        let backend = MockExpenseBackend::start("secret", "sara", vec![]).await;

        let wrong = ApiClient::new(&backend.url(), Session::new("nope")).unwrap();
        match wrong.fetch_profile().await {
            Err(Error::Api { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Not authorized");
            }
            other => panic!("expected API error, got {:?}", other),
        }

        let client = ApiClient::new(&backend.url(), Session::new("secret")).unwrap();
        match client.delete_expense("missing").await {
            Err(Error::Api { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Expense not found");
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }
}
