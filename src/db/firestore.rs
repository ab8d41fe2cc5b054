// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed wheel-store operations.
//!
//! Documents live in a two-level namespace:
//! - `accounts/{uid}` records when the account last saved a wheel
//! - `accounts/{uid}/wheels/{title}` holds one wheel per sanitized title

use crate::db::{collections, fields};
use crate::error::AppError;
use crate::models::{wheel, Account, WheelConfig, WheelDocument};
use crate::title::sanitize_wheel_title;
use chrono::{DateTime, Utc};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // Use ExternalJwtFunctionSource to provide a dummy token without needing async-trait
        // or a custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Helper for the `accounts/{uid}` parent path of the wheels sub-collection.
    fn account_path(&self, uid: &str) -> Result<firestore::ParentPathBuilder, AppError> {
        self.get_client()?
            .parent_path(collections::ACCOUNTS, uid)
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Account Operations ──────────────────────────────────────

    /// Get an account document by uid.
    pub async fn get_account(&self, uid: &str) -> Result<Option<Account>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::ACCOUNTS)
            .obj()
            .one(uid)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Record account activity, creating the account document if needed.
    ///
    /// Full replace: the document ends up containing exactly `uid` and
    /// `lastActive`, whatever was there before.
    pub async fn log_user_activity(
        &self,
        server_now: DateTime<Utc>,
        uid: &str,
    ) -> Result<(), AppError> {
        let account = Account {
            uid: uid.to_string(),
            last_active: server_now,
        };

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::ACCOUNTS)
            .document_id(uid)
            .object(&account)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete an account and all of its wheels in one transaction.
    ///
    /// All-or-nothing: if the commit fails, every wheel and the account
    /// document survive. Wheels created after the listing snapshot are
    /// not part of the transaction and survive either way.
    ///
    /// Firestore caps a transaction at 500 writes, which bounds the
    /// number of wheels an account can hold.
    pub async fn delete_account(&self, uid: &str) -> Result<(), AppError> {
        let client = self.get_client()?;
        let parent_path = self.account_path(uid)?;

        let wheels: Vec<WheelDocument> = client
            .fluent()
            .select()
            .from(collections::WHEELS)
            .parent(&parent_path)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        for wheel in &wheels {
            // Stored titles are already sanitized, so the title is the document ID.
            client
                .fluent()
                .delete()
                .from(collections::WHEELS)
                .parent(&parent_path)
                .document_id(&wheel.config.title)
                .add_to_transaction(&mut transaction)
                .map_err(|e| {
                    AppError::Database(format!("Failed to add wheel deletion to transaction: {}", e))
                })?;
        }

        client
            .fluent()
            .delete()
            .from(collections::ACCOUNTS)
            .document_id(uid)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add account deletion to transaction: {}", e))
            })?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Account deletion commit failed: {}", e)))?;

        tracing::info!(uid, wheels = wheels.len(), "Account deleted");

        Ok(())
    }

    // ─── Wheel Operations ────────────────────────────────────────

    /// List every wheel config for an account, sorted by title
    /// (case-insensitive). An account with no wheels yields an empty vec.
    pub async fn get_wheels(&self, uid: &str) -> Result<Vec<WheelConfig>, AppError> {
        let parent_path = self.account_path(uid)?;

        let documents: Vec<WheelDocument> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::WHEELS)
            .parent(&parent_path)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut configs: Vec<WheelConfig> = documents.into_iter().map(|d| d.config).collect();
        wheel::sort_by_title(&mut configs);
        Ok(configs)
    }

    /// Fetch one wheel document by title (sanitized before lookup).
    pub async fn get_wheel(
        &self,
        uid: &str,
        wheel_title: &str,
    ) -> Result<Option<WheelDocument>, AppError> {
        let title = sanitize_wheel_title(wheel_title);
        let parent_path = self.account_path(uid)?;

        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::WHEELS)
            .parent(&parent_path)
            .obj()
            .one(&title)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Record that a wheel was read: bump `readCount` and stamp `lastRead`.
    ///
    /// A read of a title with no stored wheel is a silent no-op. The
    /// counter uses a server-side increment, so concurrent reads of an
    /// existing wheel all land. A delete racing the existence check is
    /// an accepted race.
    pub async fn log_wheel_read(
        &self,
        server_now: DateTime<Utc>,
        uid: &str,
        wheel_title: &str,
    ) -> Result<(), AppError> {
        let title = sanitize_wheel_title(wheel_title);

        let Some(mut document) = self.get_wheel(uid, &title).await? else {
            return Ok(());
        };
        document.last_read = Some(server_now);

        let parent_path = self.account_path(uid)?;
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields([fields::LAST_READ])
            .in_col(collections::WHEELS)
            .document_id(&title)
            .parent(&parent_path)
            .object(&document)
            .transforms(|t| t.fields([t.field(fields::READ_COUNT).increment(1)]))
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a wheel by title. Deleting a title that was never saved
    /// succeeds (idempotent).
    pub async fn delete_wheel(&self, uid: &str, wheel_title: &str) -> Result<(), AppError> {
        let title = sanitize_wheel_title(wheel_title);
        let parent_path = self.account_path(uid)?;

        self.get_client()?
            .fluent()
            .delete()
            .from(collections::WHEELS)
            .parent(&parent_path)
            .document_id(&title)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Save a wheel config, creating or updating by sanitized title.
    ///
    /// Every save first records account activity (creating the account
    /// on the user's first save). The wheel write is committed through
    /// a transaction: an update touches only `config` and `lastWrite`,
    /// a create writes the full document with zeroed read tracking.
    ///
    /// Returns the config as stored, with its title sanitized; the
    /// caller's value is consumed, never aliased.
    pub async fn save_wheel(
        &self,
        server_now: DateTime<Utc>,
        uid: &str,
        mut config: WheelConfig,
    ) -> Result<WheelConfig, AppError> {
        // First create an account if there isn't one.
        self.log_user_activity(server_now, uid).await?;

        config.title = sanitize_wheel_title(&config.title);

        let client = self.get_client()?;
        let parent_path = self.account_path(uid)?;

        let existing: Option<WheelDocument> = client
            .fluent()
            .select()
            .by_id_in(collections::WHEELS)
            .parent(&parent_path)
            .obj()
            .one(&config.title)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        match existing {
            Some(mut document) => {
                document.config = config.clone();
                document.last_write = server_now;

                client
                    .fluent()
                    .update()
                    .fields([fields::CONFIG, fields::LAST_WRITE])
                    .in_col(collections::WHEELS)
                    .document_id(&config.title)
                    .parent(&parent_path)
                    .object(&document)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!("Failed to add wheel update to transaction: {}", e))
                    })?;

                tracing::debug!(uid, title = %config.title, "Updating wheel");
            }
            None => {
                let document = WheelDocument {
                    config: config.clone(),
                    created: server_now,
                    last_write: server_now,
                    last_read: None,
                    read_count: 0,
                };

                client
                    .fluent()
                    .update()
                    .in_col(collections::WHEELS)
                    .document_id(&config.title)
                    .parent(&parent_path)
                    .object(&document)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!("Failed to add wheel create to transaction: {}", e))
                    })?;

                tracing::debug!(uid, title = %config.title, "Creating wheel");
            }
        }

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Wheel save commit failed: {}", e)))?;

        Ok(config)
    }
}
