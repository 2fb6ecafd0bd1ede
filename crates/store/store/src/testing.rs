use chrono::Utc;

use tryon_core::{EncodedImage, FeedbackRecord, ImageRole, StatusCheck, TryOnRecord, UploadRecord};

use crate::error::StoreError;
use crate::store::TryOnStore;

fn sample_tryon() -> TryOnRecord {
    TryOnRecord::completed(
        EncodedImage::from_bytes(b"person"),
        EncodedImage::from_bytes(b"garment"),
        EncodedImage::from_bytes(b"result"),
    )
}

fn feedback(serial_number: u64, rating: u8) -> FeedbackRecord {
    FeedbackRecord {
        serial_number,
        rating,
        comment: Some("fits well".into()),
        customer_name: None,
        submitted_at: Utc::now(),
    }
}

/// Run the full store conformance test suite.
///
/// Call this from your backend's test module with a fresh store instance.
///
/// # Errors
///
/// Returns an error if the backend fails an operation.
pub async fn run_store_conformance_tests(store: &dyn TryOnStore) -> Result<(), StoreError> {
    test_feedback_serials(store).await?;
    test_upload_missing(store).await?;
    test_upload_round_trip(store).await?;
    test_tryon_missing(store).await?;
    test_tryon_round_trip(store).await?;
    test_attach_feedback(store).await?;
    test_attach_feedback_missing(store).await?;
    test_feedback_replaced(store).await?;
    test_status_checks(store).await?;
    Ok(())
}

async fn test_feedback_serials(store: &dyn TryOnStore) -> Result<(), StoreError> {
    let first = store.next_feedback_serial().await?;
    assert_eq!(first, 1, "first serial on a fresh store should be 1");
    let mut previous = first;
    for _ in 0..5 {
        let next = store.next_feedback_serial().await?;
        assert!(next > previous, "serials must strictly increase");
        previous = next;
    }
    Ok(())
}

async fn test_upload_missing(store: &dyn TryOnStore) -> Result<(), StoreError> {
    let payload = store.upload_payload("no-such-upload").await?;
    assert!(payload.is_none(), "unknown upload token should return None");
    Ok(())
}

async fn test_upload_round_trip(store: &dyn TryOnStore) -> Result<(), StoreError> {
    let record = UploadRecord::new(EncodedImage::from_bytes(b"staged"), Some(ImageRole::Person));
    store.put_upload(&record).await?;
    let payload = store.upload_payload(&record.upload_id).await?;
    assert_eq!(payload, Some(record.payload.clone()));

    let anonymous = UploadRecord::new(EncodedImage::from_bytes(b"anon"), None);
    store.put_upload(&anonymous).await?;
    let payload = store.upload_payload(&anonymous.upload_id).await?;
    assert_eq!(payload, Some(anonymous.payload));
    Ok(())
}

async fn test_tryon_missing(store: &dyn TryOnStore) -> Result<(), StoreError> {
    let record = store.get_tryon("no-such-tryon").await?;
    assert!(record.is_none(), "unknown try-on id should return None");
    Ok(())
}

async fn test_tryon_round_trip(store: &dyn TryOnStore) -> Result<(), StoreError> {
    let record = sample_tryon();
    store.insert_tryon(&record).await?;
    let fetched = store.get_tryon(&record.id).await?;
    assert_eq!(fetched.as_ref(), Some(&record));
    Ok(())
}

async fn test_attach_feedback(store: &dyn TryOnStore) -> Result<(), StoreError> {
    let record = sample_tryon();
    store.insert_tryon(&record).await?;

    let before = store.list_feedback().await?;
    assert!(
        before.iter().all(|e| e.try_on_id != record.id),
        "try-on without feedback must not be listed"
    );

    let fb = feedback(100, 4);
    let attached = store.attach_feedback(&record.id, &fb).await?;
    assert!(attached, "attach on existing try-on should return true");

    let fetched = store.get_tryon(&record.id).await?;
    let fetched = fetched.expect("try-on should still exist");
    assert_eq!(fetched.feedback.as_ref(), Some(&fb));
    assert_eq!(fetched.result_image, record.result_image, "images untouched");

    let listed = store.list_feedback().await?;
    let entry = listed
        .iter()
        .find(|e| e.try_on_id == record.id)
        .expect("try-on with feedback should be listed");
    assert_eq!(entry.feedback, fb);
    Ok(())
}

async fn test_attach_feedback_missing(store: &dyn TryOnStore) -> Result<(), StoreError> {
    let attached = store.attach_feedback("no-such-tryon", &feedback(101, 3)).await?;
    assert!(!attached, "attach on missing try-on should return false");
    assert!(
        store.get_tryon("no-such-tryon").await?.is_none(),
        "attach must not create a record"
    );
    Ok(())
}

async fn test_feedback_replaced(store: &dyn TryOnStore) -> Result<(), StoreError> {
    let record = sample_tryon();
    store.insert_tryon(&record).await?;
    store.attach_feedback(&record.id, &feedback(200, 2)).await?;
    store.attach_feedback(&record.id, &feedback(201, 5)).await?;

    let listed = store.list_feedback().await?;
    let entries: Vec<_> = listed.iter().filter(|e| e.try_on_id == record.id).collect();
    assert_eq!(entries.len(), 1, "a try-on carries at most one feedback");
    assert_eq!(entries[0].feedback.serial_number, 201);
    assert_eq!(entries[0].feedback.rating, 5);
    Ok(())
}

async fn test_status_checks(store: &dyn TryOnStore) -> Result<(), StoreError> {
    let first = StatusCheck::new("client-a");
    let second = StatusCheck::new("client-b");
    store.insert_status_check(&first).await?;
    store.insert_status_check(&second).await?;

    let all = store.list_status_checks(1000).await?;
    let ids: Vec<_> = all.iter().map(|c| c.id.as_str()).collect();
    let a = ids.iter().position(|id| *id == first.id).expect("first listed");
    let b = ids.iter().position(|id| *id == second.id).expect("second listed");
    assert!(a < b, "status checks are listed in insertion order");

    let limited = store.list_status_checks(1).await?;
    assert_eq!(limited.len(), 1, "limit caps the listing");
    Ok(())
}
