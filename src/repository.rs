use std::future::Future;
use std::time::Duration;

use chrono::NaiveDate;
use sqlx::{postgres::PgRow, PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::domain::{
    billing_period::BillingPeriod, month::Month, new_subscription::NewSubscription, page::Page,
    subscription::Subscription, subscription_filter::SubscriptionFilter,
};

const SUBSCRIPTION_COLUMNS: &str =
    "id, user_id, service_name, price, start_date, end_date, created_at, updated_at";

#[derive(thiserror::Error)]
pub enum RepositoryError {
    #[error("Subscription not found.")]
    NotFound,
    #[error("Failed to execute a query against the database.")]
    Store(#[from] sqlx::Error),
    #[error("The database did not answer within {0:?}.")]
    DeadlineElapsed(Duration),
}

impl std::fmt::Debug for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepositoryError::Store(err) => write!(f, "{}\nCaused by:\n\t{}", self, err),
            _ => write!(f, "{}", self),
        }
    }
}

/// Single-statement access to the `subscriptions` table.
///
/// Each operation is bounded by `deadline`; when it elapses the in-flight query is dropped and
/// `RepositoryError::DeadlineElapsed` is returned. Nothing is retried.
#[derive(Clone)]
pub struct SubscriptionRepository {
    db_pool: PgPool,
    deadline: Duration,
}

impl SubscriptionRepository {
    pub fn new(db_pool: PgPool, deadline: Duration) -> SubscriptionRepository {
        SubscriptionRepository { db_pool, deadline }
    }

    #[tracing::instrument(
        name = "Insert a new subscription into the database",
        skip(self, new_subscription),
        fields(user_id = %new_subscription.user_id)
    )]
    pub async fn create(
        &self,
        new_subscription: &NewSubscription,
    ) -> Result<Subscription, RepositoryError> {
        let query = format!(
            r#"
            INSERT INTO subscriptions (user_id, service_name, price, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            SUBSCRIPTION_COLUMNS
        );

        self.within_deadline(
            sqlx::query(&query)
                .bind(new_subscription.user_id)
                .bind(new_subscription.service_name.as_ref())
                .bind(new_subscription.price.amount())
                .bind(new_subscription.start.first_day())
                .bind(new_subscription.end.map(|end| end.first_day()))
                .try_map(|row: PgRow| subscription_from_row(&row))
                .fetch_one(&self.db_pool),
        )
        .await
    }

    #[tracing::instrument(name = "Fetch a subscription by id", skip(self))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Subscription, RepositoryError> {
        let query = format!("SELECT {} FROM subscriptions WHERE id = $1", SUBSCRIPTION_COLUMNS);

        self.within_deadline(
            sqlx::query(&query)
                .bind(id)
                .try_map(|row: PgRow| subscription_from_row(&row))
                .fetch_optional(&self.db_pool),
        )
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    #[tracing::instrument(name = "Delete a subscription by id", skip(self))]
    pub async fn delete_by_id(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = self
            .within_deadline(
                sqlx::query("DELETE FROM subscriptions WHERE id = $1")
                    .bind(id)
                    .execute(&self.db_pool),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    #[tracing::instrument(
        name = "Replace a subscription by id",
        skip(self, new_subscription),
        fields(user_id = %new_subscription.user_id)
    )]
    pub async fn update_by_id(
        &self,
        id: Uuid,
        new_subscription: &NewSubscription,
    ) -> Result<Subscription, RepositoryError> {
        let query = format!(
            r#"
            UPDATE subscriptions
            SET user_id = $2, service_name = $3, price = $4, start_date = $5, end_date = $6,
                updated_at = now()
            WHERE id = $1
            RETURNING {}
            "#,
            SUBSCRIPTION_COLUMNS
        );

        self.within_deadline(
            sqlx::query(&query)
                .bind(id)
                .bind(new_subscription.user_id)
                .bind(new_subscription.service_name.as_ref())
                .bind(new_subscription.price.amount())
                .bind(new_subscription.start.first_day())
                .bind(new_subscription.end.map(|end| end.first_day()))
                .try_map(|row: PgRow| subscription_from_row(&row))
                .fetch_optional(&self.db_pool),
        )
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// Newest first.
    #[tracing::instrument(name = "List subscriptions", skip(self))]
    pub async fn list(
        &self,
        filter: &SubscriptionFilter,
        page: Page,
    ) -> Result<Vec<Subscription>, RepositoryError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(SUBSCRIPTION_COLUMNS).push(" FROM subscriptions");
        push_filter(&mut builder, filter, " WHERE ");
        builder
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        self.within_deadline(
            builder
                .build()
                .try_map(|row: PgRow| subscription_from_row(&row))
                .fetch_all(&self.db_pool),
        )
        .await
    }

    /// Total billed over `period` by every subscription matching `filter`.
    ///
    /// The store over-selects candidates that overlap the period at all; each candidate is
    /// then clipped to the period and billed per whole month.
    #[tracing::instrument(name = "Summarize subscription costs", skip(self))]
    pub async fn summary(
        &self,
        period: BillingPeriod,
        filter: &SubscriptionFilter,
    ) -> Result<i64, RepositoryError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT price, start_date, end_date FROM subscriptions WHERE start_date <= ",
        );
        builder
            .push_bind(period.to.first_day())
            .push(" AND (end_date IS NULL OR end_date >= ")
            .push_bind(period.from.first_day())
            .push(")");
        push_filter(&mut builder, filter, " AND ");

        let candidates = self
            .within_deadline(
                builder
                    .build()
                    .try_map(|row: PgRow| {
                        let price: i64 = row.try_get("price")?;
                        let start: NaiveDate = row.try_get("start_date")?;
                        let end: Option<NaiveDate> = row.try_get("end_date")?;

                        Ok((price, Month::from_date(start), end.map(Month::from_date)))
                    })
                    .fetch_all(&self.db_pool),
            )
            .await?;

        let total = candidates
            .into_iter()
            .map(|(price, start, end)| period.charge(price, start, end))
            .fold(0_i64, i64::saturating_add);

        tracing::debug!("Summary total is {}", total);

        Ok(total)
    }

    #[tracing::instrument(name = "Ping the database", skip(self))]
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        self.within_deadline(sqlx::query("SELECT 1").execute(&self.db_pool))
            .await
            .map(|_| ())
    }

    async fn within_deadline<T, F>(&self, operation: F) -> Result<T, RepositoryError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.deadline, operation).await {
            Ok(result) => result.map_err(RepositoryError::Store),
            Err(_) => Err(RepositoryError::DeadlineElapsed(self.deadline)),
        }
    }
}

/// Appends one `column = $n` clause per present filter, always in the same field order,
/// joined with `AND`. `connector` introduces the first clause.
fn push_filter<'args>(
    builder: &mut QueryBuilder<'args, Postgres>,
    filter: &SubscriptionFilter,
    connector: &str,
) {
    let mut connector = connector;

    if let Some(user_id) = filter.user_id {
        builder.push(connector).push("user_id = ").push_bind(user_id);
        connector = " AND ";
    }

    if let Some(service_name) = &filter.service_name {
        builder
            .push(connector)
            .push("service_name = ")
            .push_bind(service_name.clone());
    }
}

fn subscription_from_row(row: &PgRow) -> Result<Subscription, sqlx::Error> {
    let start_date: NaiveDate = row.try_get("start_date")?;
    let end_date: Option<NaiveDate> = row.try_get("end_date")?;

    Ok(Subscription {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        service_name: row.try_get("service_name")?,
        price: row.try_get("price")?,
        start_date: Month::from_date(start_date),
        end_date: end_date.map(Month::from_date),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
