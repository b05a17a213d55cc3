/*! Database setup and demo data for manual testing. */

use rusqlite::{Connection, Transaction as SqlTransaction};
use serde_json::{Value, json};
use time::{Duration, OffsetDateTime};

use crate::{
    Error,
    store::{Collection, DocumentId, DocumentStore, create_document_table, timestamp},
};

/// Create the tables used by the app if they do not exist yet.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_document_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Fill `store` with a handful of products, customers and transactions
/// spread over the six months before `now`.
///
/// # Errors
/// Returns an error if a document could not be written.
pub fn seed_demo_data(store: &dyn DocumentStore, now: OffsetDateTime) -> Result<(), Error> {
    let products = [
        json!({
            "name": "Linen Button-Up Shirt",
            "category_id": "tops",
            "description": "A breathable linen shirt for hot days.",
            "gender": "unisex",
            "price": 289000,
            "stock": 24,
            "size": ["S", "M", "L", "XL"],
            "color": ["white", "sand"],
            "materials": ["linen"],
            "occasions": ["casual", "vacation"],
            "temperature_suitability": ["hot"],
        }),
        json!({
            "name": "Batik Wrap Dress",
            "category_id": "dresses",
            "description": "Hand-stamped batik dress with an adjustable wrap waist.",
            "gender": "female",
            "price": 459000,
            "stock": 8,
            "size": ["S", "M", "L"],
            "color": ["indigo"],
            "materials": ["cotton"],
            "occasions": ["formal", "party"],
            "suitable_for_body_type": ["hourglass", "pear"],
        }),
        json!({
            "name": "Chino Trousers",
            "category_id": "bottoms",
            "description": "Slim fit chinos with a little stretch.",
            "gender": "male",
            "price": 349000,
            "stock": 15,
            "size": ["30", "32", "34"],
            "color": ["khaki", "navy"],
            "materials": ["cotton", "elastane"],
            "recommended_for_style": ["smart casual"],
        }),
    ];

    let customers = [
        json!({
            "name": "Siti Rahma",
            "phone": "081234567890",
            "email": "siti@example.com",
            "address": "Jl. Merdeka No. 1, Bandung",
        }),
        json!({
            "name": "Budi Santoso",
            "phone": "081298765432",
            "email": "budi@example.com",
            "address": "Jl. Sudirman No. 10, Jakarta",
        }),
    ];

    for product in products {
        create(store, Collection::Products, product)?;
    }

    let mut customer_ids = Vec::with_capacity(customers.len());
    for customer in customers {
        let name = customer["name"].clone();
        let phone = customer["phone"].clone();
        let id = create(store, Collection::Customers, customer)?;
        customer_ids.push((id, name, phone));
    }

    let payments = ["bank_transfer", "gopay", "qris", "credit_card"];
    let statuses = ["success", "success", "pending", "success", "failed"];

    for i in 0..18_i64 {
        let (customer_id, name, phone) = &customer_ids[i as usize % customer_ids.len()];
        let created_at = timestamp::format(now - Duration::days(i * 10))
            .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

        create(
            store,
            Collection::Transactions,
            json!({
                "order_id": format!("ORD-{:04}", 1000 + i),
                "status": statuses[i as usize % statuses.len()],
                "total_amount": 150_000 + (i % 5) * 75_000,
                "payment_method": payments[i as usize % payments.len()],
                "customer_id": customer_id.to_string(),
                "customer_details": { "name": name, "phone": phone },
                "created_at": created_at,
            }),
        )?;
    }

    tracing::info!("seeded demo data");

    Ok(())
}

fn create(
    store: &dyn DocumentStore,
    collection: Collection,
    value: Value,
) -> Result<DocumentId, Error> {
    match value {
        Value::Object(fields) => store.create(collection, fields),
        other => Err(Error::JSONSerializationError(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::store::{Collection, DocumentStore, SqliteDocumentStore};

    use super::{initialize, seed_demo_data};

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("Could not initialize database");
        initialize(&connection).expect("Could not initialize database twice");
    }

    #[test]
    fn seed_creates_every_collection() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let store = SqliteDocumentStore::new(Arc::new(Mutex::new(connection)));

        seed_demo_data(&store, datetime!(2025-06-15 12:00 UTC)).expect("Could not seed data");

        assert_eq!(store.list_all(Collection::Products).unwrap().len(), 3);
        assert_eq!(store.list_all(Collection::Customers).unwrap().len(), 2);
        assert_eq!(store.list_all(Collection::Transactions).unwrap().len(), 18);
    }
}
