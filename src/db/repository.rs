//! Database repository for CRUD operations.
//!
//! Uses prepared statements and transactions for data integrity. All reads
//! map the nullable wire columns to the domain defaults, so callers never
//! see a half-filled campaign.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use subtle::ConstantTimeEq;

use crate::errors::AppError;
use crate::models::{
    duration_label, duration_nights, has_discount, slugify, AdminUser, AuthUser, Campaign,
    CampaignStatus,
    Category, CategoryRef, CreateCampaignRequest, CreateCategoryRequest, CreateUserRequest,
    MoveDirection, UpdateCampaignRequest, UpdateCategoryRequest, UpdateUserRequest, VerifyOutcome,
    DEFAULT_DESCRIPTION, DEFAULT_DURATION_NIGHTS, DEFAULT_IMAGE, DEFAULT_PRICE_LABEL,
    DEFAULT_WAVE_COLOR,
};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== CAMPAIGN OPERATIONS ====================

    /// List all campaigns, newest-created first.
    pub async fn list_campaigns(&self) -> Result<Vec<Campaign>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, title, description, price_original, price_promotional, price_label,
                      image, start_date, end_date, duration_nights, status, category,
                      booking_url, wave_color, created_at, updated_at
               FROM campaigns ORDER BY created_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut refs = self.load_category_refs().await?;

        Ok(rows
            .iter()
            .map(|row| {
                let mut campaign = campaign_from_row(row);
                campaign.categories = refs.remove(&campaign.id).unwrap_or_default();
                campaign
            })
            .collect())
    }

    /// Get a campaign by ID.
    pub async fn get_campaign(&self, id: &str) -> Result<Option<Campaign>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, title, description, price_original, price_promotional, price_label,
                      image, start_date, end_date, duration_nights, status, category,
                      booking_url, wave_color, created_at, updated_at
               FROM campaigns WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut campaign = campaign_from_row(&row);
        campaign.categories = self.category_refs_for(id).await?;
        Ok(Some(campaign))
    }

    /// Create a new campaign and re-read the stored row.
    ///
    /// The re-read guarantees the caller sees exactly what the next list
    /// will return (defaults applied, join rows attached).
    pub async fn create_campaign(
        &self,
        request: &CreateCampaignRequest,
    ) -> Result<Campaign, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let nights = duration_nights(request.start_date.as_deref(), request.end_date.as_deref());
        let status = request.status.unwrap_or(CampaignStatus::Active);

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"INSERT INTO campaigns (
                id, title, description, price_original, price_promotional, price_label,
                image, start_date, end_date, duration_nights, status, category,
                booking_url, wave_color, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.price_original)
        .bind(request.price_promotional)
        .bind(&request.price_label)
        .bind(&request.image)
        .bind(&request.start_date)
        .bind(&request.end_date)
        .bind(nights)
        .bind(status.as_str())
        .bind(&request.category)
        .bind(&request.booking_url)
        .bind(&request.wave_color)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        if let Some(category_ids) = &request.category_ids {
            for category_id in category_ids {
                sqlx::query(
                    "INSERT OR IGNORE INTO campaign_categories (campaign_id, category_id) VALUES (?, ?)",
                )
                .bind(&id)
                .bind(category_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        self.get_campaign(&id).await?.ok_or_else(|| {
            AppError::Internal(format!("Campaign {} vanished after insert", id))
        })
    }

    /// Update a campaign, merging the provided fields over the stored row.
    ///
    /// The stay length is recomputed only when the partial carries both
    /// dates; otherwise the stored value stands.
    pub async fn update_campaign(
        &self,
        id: &str,
        request: &UpdateCampaignRequest,
    ) -> Result<Campaign, AppError> {
        let existing = self
            .get_campaign(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Campaign {} not found", id)))?;

        let now = Utc::now().to_rfc3339();

        let title = request.title.as_ref().unwrap_or(&existing.title);
        let description = request
            .description
            .clone()
            .unwrap_or_else(|| existing.description.clone());
        let price_original = request.price_original.unwrap_or(existing.price_original);
        let price_promotional = request
            .price_promotional
            .unwrap_or(existing.price_promotional);
        let price_label = request
            .price_label
            .clone()
            .unwrap_or_else(|| existing.price_label.clone());
        let image = request.image.clone().unwrap_or_else(|| existing.image.clone());
        let start_date = request.start_date.clone().or(existing.start_date.clone());
        let end_date = request.end_date.clone().or(existing.end_date.clone());
        let nights = if request.start_date.is_some() && request.end_date.is_some() {
            duration_nights(request.start_date.as_deref(), request.end_date.as_deref())
        } else {
            existing.duration_nights
        };
        let status = request.status.unwrap_or(existing.status);
        let category = request.category.clone().unwrap_or_else(|| existing.category.clone());
        let booking_url = request.booking_url.clone().or(existing.booking_url.clone());
        let wave_color = request
            .wave_color
            .clone()
            .unwrap_or_else(|| existing.wave_color.clone());

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"UPDATE campaigns SET
                title = ?, description = ?, price_original = ?, price_promotional = ?,
                price_label = ?, image = ?, start_date = ?, end_date = ?,
                duration_nights = ?, status = ?, category = ?, booking_url = ?,
                wave_color = ?, updated_at = ?
            WHERE id = ?"#,
        )
        .bind(title)
        .bind(&description)
        .bind(price_original)
        .bind(price_promotional)
        .bind(&price_label)
        .bind(&image)
        .bind(&start_date)
        .bind(&end_date)
        .bind(nights)
        .bind(status.as_str())
        .bind(&category)
        .bind(&booking_url)
        .bind(&wave_color)
        .bind(&now)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if let Some(category_ids) = &request.category_ids {
            sqlx::query("DELETE FROM campaign_categories WHERE campaign_id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for category_id in category_ids {
                sqlx::query(
                    "INSERT OR IGNORE INTO campaign_categories (campaign_id, category_id) VALUES (?, ?)",
                )
                .bind(id)
                .bind(category_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        self.get_campaign(id).await?.ok_or_else(|| {
            AppError::Internal(format!("Campaign {} vanished after update", id))
        })
    }

    /// Delete a campaign and its join rows in one transaction.
    pub async fn delete_campaign(&self, id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM campaign_categories WHERE campaign_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM campaigns WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Campaign {} not found", id)));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Load the category refs for every campaign at once.
    async fn load_category_refs(&self) -> Result<HashMap<String, Vec<CategoryRef>>, AppError> {
        let rows = sqlx::query(
            r#"SELECT cc.campaign_id, c.id, c.name
               FROM campaign_categories cc
               JOIN categories c ON c.id = cc.category_id
               ORDER BY c.display_order, c.name"#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut refs: HashMap<String, Vec<CategoryRef>> = HashMap::new();
        for row in rows {
            let campaign_id: String = row.get("campaign_id");
            refs.entry(campaign_id).or_default().push(CategoryRef {
                id: row.get("id"),
                name: row.get("name"),
            });
        }
        Ok(refs)
    }

    async fn category_refs_for(&self, campaign_id: &str) -> Result<Vec<CategoryRef>, AppError> {
        let rows = sqlx::query(
            r#"SELECT c.id, c.name
               FROM campaign_categories cc
               JOIN categories c ON c.id = cc.category_id
               WHERE cc.campaign_id = ?
               ORDER BY c.display_order, c.name"#,
        )
        .bind(campaign_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CategoryRef {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect())
    }

    // ==================== CATEGORY OPERATIONS ====================

    /// List all categories by display order, name as stable fallback.
    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, description, slug, display_order, created_at FROM categories ORDER BY display_order, name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(category_from_row).collect())
    }

    /// Get a category by ID.
    pub async fn get_category(&self, id: &str) -> Result<Option<Category>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, description, slug, display_order, created_at FROM categories WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(category_from_row))
    }

    /// Create a new category at the end of the display order.
    pub async fn create_category(
        &self,
        request: &CreateCategoryRequest,
    ) -> Result<Category, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let name = request.name.trim().to_string();
        let slug = slugify(&name);

        // The next-order read and the insert share a transaction so two
        // concurrent creates cannot mint the same order.
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT COALESCE(MAX(display_order) + 1, 0) AS next_order FROM categories")
            .fetch_one(&mut *tx)
            .await?;
        let display_order: i64 = row.get("next_order");

        sqlx::query(
            "INSERT INTO categories (id, name, description, slug, display_order, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&name)
        .bind(&request.description)
        .bind(&slug)
        .bind(display_order)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Category {
            id,
            name,
            description: request.description.clone(),
            slug,
            display_order,
            created_at: now,
        })
    }

    /// Update a category; the slug follows the name, the order never moves.
    pub async fn update_category(
        &self,
        id: &str,
        request: &UpdateCategoryRequest,
    ) -> Result<Category, AppError> {
        let existing = self
            .get_category(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        let name = request
            .name
            .as_ref()
            .map(|n| n.trim().to_string())
            .unwrap_or(existing.name);
        let slug = slugify(&name);
        let description = request.description.clone().or(existing.description);

        sqlx::query("UPDATE categories SET name = ?, description = ?, slug = ? WHERE id = ?")
            .bind(&name)
            .bind(&description)
            .bind(&slug)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(Category {
            id: id.to_string(),
            name,
            description,
            slug,
            display_order: existing.display_order,
            created_at: existing.created_at,
        })
    }

    /// Delete a category. Remaining display orders keep their gaps.
    pub async fn delete_category(&self, id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM campaign_categories WHERE category_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Swap a category's display order with its neighbor.
    ///
    /// Moving the first category up or the last one down is a no-op, not an
    /// error. Both writes run in one transaction so a crash cannot leave the
    /// swap half-applied.
    pub async fn move_category(
        &self,
        id: &str,
        direction: MoveDirection,
    ) -> Result<Vec<Category>, AppError> {
        let ordered = self.list_categories().await?;
        let position = ordered
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        let neighbor = match direction {
            MoveDirection::Up => position.checked_sub(1),
            MoveDirection::Down => {
                if position + 1 < ordered.len() {
                    Some(position + 1)
                } else {
                    None
                }
            }
        };

        let Some(neighbor) = neighbor else {
            // Boundary: nothing to swap with.
            return Ok(ordered);
        };

        let current = &ordered[position];
        let other = &ordered[neighbor];

        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE categories SET display_order = ? WHERE id = ?")
            .bind(other.display_order)
            .bind(&current.id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE categories SET display_order = ? WHERE id = ?")
            .bind(current.display_order)
            .bind(&other.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.list_categories().await
    }

    // ==================== USER OPERATIONS ====================

    /// List all admin users.
    pub async fn list_users(&self) -> Result<Vec<AdminUser>, AppError> {
        let rows = sqlx::query(
            "SELECT id, email, name, role, created_at, updated_at FROM profiles ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(user_from_row).collect())
    }

    /// Get an admin user by ID.
    pub async fn get_user(&self, id: &str) -> Result<Option<AdminUser>, AppError> {
        let row = sqlx::query(
            "SELECT id, email, name, role, created_at, updated_at FROM profiles WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Create a new admin user.
    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<AdminUser, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let email = request.email.trim().to_lowercase();

        sqlx::query(
            "INSERT INTO profiles (id, email, name, role, password, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&email)
        .bind(&request.name)
        .bind(&request.role)
        .bind(&request.password)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(AdminUser {
            id,
            email,
            name: request.name.clone(),
            role: request.role.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Update an admin user.
    pub async fn update_user(
        &self,
        id: &str,
        request: &UpdateUserRequest,
    ) -> Result<AdminUser, AppError> {
        let existing = self
            .get_user(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

        let now = Utc::now().to_rfc3339();
        let email = request
            .email
            .as_ref()
            .map(|e| e.trim().to_lowercase())
            .unwrap_or(existing.email);
        let name = request.name.clone().unwrap_or(existing.name);
        let role = request.role.clone().unwrap_or(existing.role);

        // Profile fields and the credential rotation land together or not
        // at all.
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE profiles SET email = ?, name = ?, role = ?, updated_at = ? WHERE id = ?")
            .bind(&email)
            .bind(&name)
            .bind(&role)
            .bind(&now)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if let Some(password) = &request.password {
            sqlx::query("UPDATE profiles SET password = ? WHERE id = ?")
                .bind(password)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(AdminUser {
            id: id.to_string(),
            email,
            name,
            role,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete an admin user.
    pub async fn delete_user(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }

        Ok(())
    }

    /// Number of admin profiles, used for the startup seed check.
    pub async fn count_users(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM profiles")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("n"))
    }

    /// Verify credentials against the profile store.
    ///
    /// A missing email and a wrong password produce the same rejected
    /// outcome, so responses give no account-enumeration oracle. The
    /// comparison is constant-time.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<VerifyOutcome, AppError> {
        let row = sqlx::query(
            "SELECT id, email, name, role, password FROM profiles WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(VerifyOutcome::rejected());
        };

        let stored: String = row.get("password");
        let matches: bool = stored.as_bytes().ct_eq(password.as_bytes()).into();
        if !matches {
            return Ok(VerifyOutcome::rejected());
        }

        Ok(VerifyOutcome {
            success: true,
            message: None,
            user: Some(AuthUser {
                id: row.get("id"),
                email: row.get("email"),
                name: row.get("name"),
                role: row.get("role"),
            }),
        })
    }
}

// Helper functions for row conversion

fn campaign_from_row(row: &sqlx::sqlite::SqliteRow) -> Campaign {
    let description: Option<String> = row.get("description");
    let price_original: Option<f64> = row.get("price_original");
    let price_promotional: Option<f64> = row.get("price_promotional");
    let price_label: Option<String> = row.get("price_label");
    let image: Option<String> = row.get("image");
    let nights: Option<i64> = row.get("duration_nights");
    let status: String = row.get("status");
    let category: Option<String> = row.get("category");
    let wave_color: Option<String> = row.get("wave_color");

    let nights = nights.unwrap_or(DEFAULT_DURATION_NIGHTS);
    let price_original = price_original.unwrap_or(0.0);
    let price_promotional = price_promotional.unwrap_or(0.0);

    Campaign {
        id: row.get("id"),
        title: row.get("title"),
        description: description.unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        price_original,
        price_promotional,
        price_label: price_label.unwrap_or_else(|| DEFAULT_PRICE_LABEL.to_string()),
        image: image.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        duration_nights: nights,
        duration: duration_label(nights),
        has_discount: has_discount(price_original, price_promotional),
        status: CampaignStatus::from_str(&status).unwrap_or(CampaignStatus::Inactive),
        category: category.unwrap_or_default(),
        categories: Vec::new(),
        booking_url: row.get("booking_url"),
        wave_color: wave_color.unwrap_or_else(|| DEFAULT_WAVE_COLOR.to_string()),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn category_from_row(row: &sqlx::sqlite::SqliteRow) -> Category {
    Category {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        slug: row.get("slug"),
        display_order: row.get("display_order"),
        created_at: row.get("created_at"),
    }
}

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> AdminUser {
    AdminUser {
        id: row.get("id"),
        email: row.get("email"),
        name: row.get("name"),
        role: row.get("role"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
