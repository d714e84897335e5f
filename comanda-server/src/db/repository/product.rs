//! Product Repository

use super::{RepoError, RepoResult};
use crate::utils::money::{to_decimal, to_f64};
use shared::models::{Product, ProductCreate, ProductUpdate};
use sqlx::SqlitePool;

/// Prices are kept in whole cents
fn cents(price: f64) -> f64 {
    to_f64(to_decimal(price))
}

const PRODUCT_SELECT: &str = "SELECT p.id, p.name, p.price, p.category_id, c.name AS category_name, p.description, p.image, p.is_active, p.created_at, p.updated_at FROM product p JOIN category c ON c.id = p.category_id";

/// Active products, optionally limited to one category
pub async fn find_all(pool: &SqlitePool, category_id: Option<i64>) -> RepoResult<Vec<Product>> {
    let products = match category_id {
        Some(category_id) => {
            let sql = format!(
                "{PRODUCT_SELECT} WHERE p.is_active = 1 AND p.is_deleted = 0 AND c.is_deleted = 0 AND p.category_id = ? ORDER BY p.name"
            );
            sqlx::query_as::<_, Product>(&sql)
                .bind(category_id)
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = format!(
                "{PRODUCT_SELECT} WHERE p.is_active = 1 AND p.is_deleted = 0 AND c.is_deleted = 0 ORDER BY c.sort_order, p.name"
            );
            sqlx::query_as::<_, Product>(&sql).fetch_all(pool).await?
        }
    };
    Ok(products)
}

/// Product by id, including inactive ones (not deleted)
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let sql = format!("{PRODUCT_SELECT} WHERE p.id = ? AND p.is_deleted = 0");
    let product = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(product)
}

async fn ensure_category(pool: &SqlitePool, category_id: i64) -> RepoResult<()> {
    let exists: Option<i64> =
        sqlx::query_scalar("SELECT id FROM category WHERE id = ? AND is_deleted = 0")
            .bind(category_id)
            .fetch_optional(pool)
            .await?;
    match exists {
        Some(_) => Ok(()),
        None => Err(RepoError::NotFound(format!(
            "Category {category_id} not found"
        ))),
    }
}

pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    ensure_category(pool, data.category_id).await?;

    let now = shared::util::now_millis();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO product (name, price, category_id, description, image, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?6) RETURNING id",
    )
    .bind(&data.name)
    .bind(cents(data.price))
    .bind(data.category_id)
    .bind(&data.description)
    .bind(&data.image)
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ProductUpdate) -> RepoResult<Product> {
    if let Some(category_id) = data.category_id {
        ensure_category(pool, category_id).await?;
    }

    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE product SET name = COALESCE(?1, name), price = COALESCE(?2, price), category_id = COALESCE(?3, category_id), description = COALESCE(?4, description), image = COALESCE(?5, image), is_active = COALESCE(?6, is_active), updated_at = ?7 WHERE id = ?8 AND is_deleted = 0",
    )
    .bind(&data.name)
    .bind(data.price.map(cents))
    .bind(data.category_id)
    .bind(&data.description)
    .bind(&data.image)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

/// Tombstone; order lines keep pointing at the row
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE product SET is_deleted = 1, updated_at = ? WHERE id = ? AND is_deleted = 0",
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;

    #[tokio::test]
    async fn test_create_requires_live_category() {
        let pool = test_support::pool().await;
        let result = create(
            &pool,
            ProductCreate {
                name: "Anticuchos".into(),
                price: 15.0,
                category_id: 42,
                description: None,
                image: None,
            },
        )
        .await;
        assert!(matches!(result, Err(RepoError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_filters_by_category_and_activity() {
        let pool = test_support::pool().await;
        let food = test_support::category(&pool, "Fondos", true).await;
        let drinks = test_support::category(&pool, "Bebidas", false).await;
        let lomo = test_support::product(&pool, "Lomo saltado", 32.0, food.id).await;
        test_support::product(&pool, "Inca Kola", 5.0, drinks.id).await;
        let off = test_support::product(&pool, "Arroz chaufa", 22.0, food.id).await;
        update(
            &pool,
            off.id,
            ProductUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(find_all(&pool, None).await.unwrap().len(), 2);
        let food_only = find_all(&pool, Some(food.id)).await.unwrap();
        assert_eq!(food_only.len(), 1);
        assert_eq!(food_only[0].id, lomo.id);
        assert_eq!(food_only[0].category_name, "Fondos");

        // inactive products still resolve by id
        assert!(find_by_id(&pool, off.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_price_and_delete() {
        let pool = test_support::pool().await;
        let cat = test_support::category(&pool, "Postres", true).await;
        let dish = test_support::product(&pool, "Suspiro limeño", 12.0, cat.id).await;

        let updated = update(
            &pool,
            dish.id,
            ProductUpdate {
                price: Some(13.5),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.price, 13.5);
        assert_eq!(updated.name, "Suspiro limeño");

        assert!(delete(&pool, dish.id).await.unwrap());
        assert!(find_by_id(&pool, dish.id).await.unwrap().is_none());
        assert!(find_all(&pool, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_prices_are_rounded_to_cents() {
        let pool = test_support::pool().await;
        let cat = test_support::category(&pool, "Extras", true).await;
        let dish = test_support::product(&pool, "Cancha", 0.005, cat.id).await;
        assert_eq!(dish.price, 0.01);

        let updated = update(
            &pool,
            dish.id,
            ProductUpdate {
                price: Some(7.499),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.price, 7.5);
    }
}
