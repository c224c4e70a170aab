//! Resource-model properties of `BookService`, run against the in-memory store.

use bookstore_api::domain::{BookFields, BookPayload};
use bookstore_api::{BookError, BookId, BookService, MemoryBookStore};
use serde_json::json;
use std::sync::Arc;

fn service() -> BookService {
    BookService::new(Arc::new(MemoryBookStore::new()))
}

fn gatsby() -> BookFields {
    BookFields {
        title: "The Great Gatsby".to_string(),
        author: "F. Scott Fitzgerald".to_string(),
        year: 1925,
        genre: "Fiction".to_string(),
    }
}

fn payload(v: serde_json::Value) -> BookPayload {
    serde_json::from_value(v).unwrap()
}

#[tokio::test]
async fn create_then_get_round_trips_fields() {
    let books = service();
    let created = books.create(&gatsby().into()).await.unwrap();
    assert_eq!(created.fields(), gatsby());

    let found = books.get_by_id(&created.id.to_string()).await.unwrap();
    assert_eq!(found, created);
}

#[tokio::test]
async fn list_follows_insertion_order_and_count() {
    let books = service();
    assert!(books.list_all().await.unwrap().is_empty());

    let mut ids = Vec::new();
    for (i, title) in ["Dune", "Emma", "Ulysses"].iter().enumerate() {
        let mut fields = gatsby();
        fields.title = title.to_string();
        ids.push(books.create(&fields.into()).await.unwrap().id);
        assert_eq!(books.list_all().await.unwrap().len(), i + 1);
    }
    let listed: Vec<BookId> = books.list_all().await.unwrap().iter().map(|b| b.id).collect();
    assert_eq!(listed, ids);

    books.delete(&ids[1].to_string()).await.unwrap();
    let titles: Vec<String> = books.list_all().await.unwrap().into_iter().map(|b| b.title).collect();
    assert_eq!(titles, vec!["Dune", "Ulysses"]);
    assert_eq!(books.count().await.unwrap(), 2);
}

#[tokio::test]
async fn every_incomplete_create_persists_nothing() {
    let books = service();
    let keys = ["title", "author", "year", "genre"];
    let complete = serde_json::to_value(gatsby()).unwrap();

    // Each bit of `mask` drops one field; 1..=15 covers every non-empty omission.
    for mask in 1u8..16 {
        let mut body = complete.clone();
        let object = body.as_object_mut().unwrap();
        let mut omitted = Vec::new();
        for (bit, key) in keys.iter().enumerate() {
            if mask & (1 << bit) != 0 {
                object.remove(*key);
                omitted.push(*key);
            }
        }

        match books.create(&payload(body)).await {
            Err(BookError::Validation(v)) => assert_eq!(v.field_names(), omitted, "mask {:04b}", mask),
            other => panic!("mask {:04b}: expected validation error, got {:?}", mask, other),
        }
        assert_eq!(books.count().await.unwrap(), 0);
    }
}

#[tokio::test]
async fn malformed_values_persist_nothing() {
    let books = service();
    let bodies = [
        json!({ "title": "", "author": "F. Scott Fitzgerald", "year": 1925, "genre": "Fiction" }),
        json!({ "title": "The Great Gatsby", "author": "F. Scott Fitzgerald", "year": "invalid", "genre": "Fiction" }),
        json!({ "title": "The Great Gatsby", "author": "F. Scott Fitzgerald", "year": 0, "genre": "Fiction" }),
    ];
    for body in bodies {
        let err = books.create(&payload(body)).await.unwrap_err();
        assert!(matches!(err, BookError::Validation(_)), "got {:?}", err);
    }
    assert_eq!(books.count().await.unwrap(), 0);
}

#[tokio::test]
async fn update_replaces_all_fields() {
    let books = service();
    let created = books.create(&gatsby().into()).await.unwrap();

    let replacement = BookFields {
        title: "Updated Title".to_string(),
        author: "Someone Else".to_string(),
        year: 1926,
        genre: "Drama".to_string(),
    };
    let updated = books
        .update(&created.id.to_string(), &replacement.clone().into())
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.fields(), replacement);

    let reread = books.get_by_id(&created.id.to_string()).await.unwrap();
    assert_eq!(reread.fields(), replacement);
}

#[tokio::test]
async fn partial_update_is_rejected_and_leaves_record_untouched() {
    let books = service();
    let created = books.create(&gatsby().into()).await.unwrap();

    let err = books
        .update(&created.id.to_string(), &payload(json!({ "year": 1926 })))
        .await
        .unwrap_err();
    match err {
        BookError::Validation(v) => assert_eq!(v.field_names(), vec!["title", "author", "genre"]),
        other => panic!("expected validation error, got {:?}", other),
    }
    let reread = books.get_by_id(&created.id.to_string()).await.unwrap();
    assert_eq!(reread.fields(), gatsby());
}

#[tokio::test]
async fn update_checks_existence_before_validation() {
    let books = service();
    let missing = BookId::new_random().to_string();
    let err = books.update(&missing, &BookPayload::default()).await.unwrap_err();
    assert!(matches!(err, BookError::NotFound(_)), "got {:?}", err);
}

#[tokio::test]
async fn delete_then_read_and_delete_again_are_not_found() {
    let books = service();
    let id = books.create(&gatsby().into()).await.unwrap().id.to_string();

    books.delete(&id).await.unwrap();
    assert!(matches!(books.get_by_id(&id).await, Err(BookError::NotFound(_))));
    assert!(matches!(books.delete(&id).await, Err(BookError::NotFound(_))));
}

#[tokio::test]
async fn malformed_ids_are_reported_as_invalid() {
    let books = service();
    assert!(matches!(books.get_by_id("12345").await, Err(BookError::InvalidId(_))));
    assert!(matches!(
        books.update("12345", &gatsby().into()).await,
        Err(BookError::InvalidId(_))
    ));
    assert!(matches!(books.delete("not-an-id").await, Err(BookError::InvalidId(_))));
}
