//! 预订生命周期端到端测试
//!
//! 覆盖完整的前台流程：创建 → 确认 → 签入 → 服务请求 → 签出结算，
//! 以及并发签入竞争（同一预订只能有一个胜者）。

use chrono::NaiveDate;
use tempfile::TempDir;

use desk_server::bookings::{BookingError, BookingLifecycle, CheckInOutcome, CheckOutOutcome};
use desk_server::db::DbService;
use desk_server::db::repository::{booking, service_request, settlement};
use shared::models::{
    BookingCreate, BookingStatus, CheckInRequest, CheckOutRequest, PaymentStatus,
    ServiceRequestCreate, ServiceRequestStatus, ServiceType, SettlementMethod,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Open a fresh on-disk database; the TempDir guard must outlive the pool.
async fn setup() -> (TempDir, DbService, BookingLifecycle) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("desk.db");
    let db = DbService::new(db_path.to_str().unwrap()).await.unwrap();
    let lifecycle = BookingLifecycle::new(db.pool.clone());
    (dir, db, lifecycle)
}

/// Create a CONFIRMED + PAID booking for the given stay window
async fn seed_confirmed_paid(
    db: &DbService,
    check_in: NaiveDate,
    check_out: NaiveDate,
    total_cost: f64,
) -> String {
    let b = booking::create(
        &db.pool,
        BookingCreate {
            guest_first_name: "Linh".to_string(),
            guest_last_name: "Tran".to_string(),
            guest_email: "linh.tran@example.com".to_string(),
            check_in_date: check_in,
            check_out_date: check_out,
            total_cost,
            note: None,
            confirmed: false,
        },
    )
    .await
    .unwrap();

    let rows = booking::confirm(&db.pool, &b.id, true).await.unwrap();
    assert_eq!(rows, 1);
    b.id
}

/// Force a booking into an arbitrary status (test fixture only)
async fn force_status(db: &DbService, id: &str, status: &str) {
    sqlx::query("UPDATE booking SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(&db.pool)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_full_stay_flow_with_settlement() {
    let (_dir, db, lifecycle) = setup().await;
    let arrival = date(2025, 6, 10);
    let departure = date(2025, 6, 14);
    let id = seed_confirmed_paid(&db, arrival, departure, 1_000_000.0).await;

    // Check in on the arrival date, assigning a room
    let outcome = lifecycle
        .check_in(
            &id,
            &CheckInRequest {
                room_id: Some("203".to_string()),
                confirm_early: false,
            },
            arrival,
        )
        .await
        .unwrap();
    let checked_in = match outcome {
        CheckInOutcome::CheckedIn(b) => b,
        other => panic!("Expected CheckedIn, got {:?}", other),
    };
    assert_eq!(checked_in.status, BookingStatus::CheckedIn);
    assert_eq!(checked_in.room_id.as_deref(), Some("203"));

    // Order a service during the stay and complete it
    let request = service_request::create(
        &db.pool,
        ServiceRequestCreate {
            booking_id: id.clone(),
            service_type: ServiceType::Laundry,
            description: "Laundry, 3 items".to_string(),
            price: 200_000.0,
        },
    )
    .await
    .unwrap();
    lifecycle
        .update_service_request_status(&request.id, ServiceRequestStatus::Completed)
        .await
        .unwrap();

    // Folio preview before checkout: no extra charge yet
    let folio = lifecycle.folio(&id).await.unwrap();
    assert_eq!(folio.room_cost, 1_000_000.0);
    assert_eq!(folio.service_charges, 200_000.0);
    assert_eq!(folio.total_owed, 1_200_000.0);
    assert_eq!(folio.amount_paid, 1_000_000.0);
    assert_eq!(folio.outstanding, 200_000.0);

    // Outstanding balance without a method fails before any write
    let err = lifecycle
        .check_out(
            &id,
            &CheckOutRequest {
                extra_charge: Some(50_000.0),
                ..Default::default()
            },
            departure,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::MethodRequired));
    let still = booking::find_by_id(&db.pool, &id).await.unwrap().unwrap();
    assert_eq!(still.status, BookingStatus::CheckedIn);

    // Retry with a method: 1,000,000 + 200,000 + 50,000 = 1,250,000 owed
    let outcome = lifecycle
        .check_out(
            &id,
            &CheckOutRequest {
                extra_charge: Some(50_000.0),
                note: Some("Minibar".to_string()),
                method: Some(SettlementMethod::Card),
                ..Default::default()
            },
            departure,
        )
        .await
        .unwrap();
    let (b, record) = match outcome {
        CheckOutOutcome::Settled {
            booking,
            settlement,
        } => (booking, settlement),
        other => panic!("Expected Settled, got {:?}", other),
    };
    assert_eq!(b.status, BookingStatus::CheckedOut);
    assert_eq!(record.total_owed, 1_250_000.0);
    assert_eq!(record.amount_paid, 1_000_000.0);
    assert_eq!(record.outstanding, 250_000.0);
    assert_eq!(record.method, Some(SettlementMethod::Card));
    assert_eq!(record.service_charges, 200_000.0);
    assert_eq!(record.extra_charge, 50_000.0);

    // Settlement is persisted and readable
    let stored = settlement::find_by_booking(&db.pool, &id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.total_owed, 1_250_000.0);
    assert_eq!(stored.outstanding, 250_000.0);

    // Second checkout observes the committed status
    let err = lifecycle
        .check_out(
            &id,
            &CheckOutRequest {
                method: Some(SettlementMethod::Cash),
                ..Default::default()
            },
            departure,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::AlreadyProcessed(_)));
}

#[tokio::test]
async fn test_check_in_unpaid_fails_payment_required() {
    let (_dir, db, lifecycle) = setup().await;
    let b = booking::create(
        &db.pool,
        BookingCreate {
            guest_first_name: "Minh".to_string(),
            guest_last_name: "Pham".to_string(),
            guest_email: "minh.pham@example.com".to_string(),
            check_in_date: date(2025, 6, 10),
            check_out_date: date(2025, 6, 12),
            total_cost: 500_000.0,
            note: None,
            confirmed: true, // confirmed, but never paid
        },
    )
    .await
    .unwrap();

    let err = lifecycle
        .check_in(&b.id, &CheckInRequest::default(), date(2025, 6, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::PaymentRequired(_)));

    let stored = booking::find_by_id(&db.pool, &b.id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::Confirmed);
    assert_eq!(stored.payment_status, PaymentStatus::Unpaid);
}

#[tokio::test]
async fn test_early_arrival_two_phase_confirmation() {
    let (_dir, db, lifecycle) = setup().await;
    let id = seed_confirmed_paid(&db, date(2025, 6, 10), date(2025, 6, 14), 800_000.0).await;

    // Two days early: advisory only, nothing committed
    let outcome = lifecycle
        .check_in(&id, &CheckInRequest::default(), date(2025, 6, 8))
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        CheckInOutcome::EarlyArrival { days_early: 2 }
    ));
    let stored = booking::find_by_id(&db.pool, &id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::Confirmed);

    // Second call with operator confirmation commits
    let outcome = lifecycle
        .check_in(
            &id,
            &CheckInRequest {
                room_id: None,
                confirm_early: true,
            },
            date(2025, 6, 8),
        )
        .await
        .unwrap();
    assert!(matches!(outcome, CheckInOutcome::CheckedIn(_)));
}

#[tokio::test]
async fn test_early_departure_advisory_does_not_mutate() {
    let (_dir, db, lifecycle) = setup().await;
    let id = seed_confirmed_paid(&db, date(2025, 6, 10), date(2025, 6, 14), 800_000.0).await;
    lifecycle
        .check_in(&id, &CheckInRequest::default(), date(2025, 6, 10))
        .await
        .unwrap();

    // One day before the recorded departure date
    let outcome = lifecycle
        .check_out(&id, &CheckOutRequest::default(), date(2025, 6, 13))
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        CheckOutOutcome::EarlyDeparture { days_early: 1 }
    ));

    let stored = booking::find_by_id(&db.pool, &id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::CheckedIn);
    assert!(
        settlement::find_by_booking(&db.pool, &id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_checkout_fully_prepaid_needs_no_method() {
    let (_dir, db, lifecycle) = setup().await;
    let id = seed_confirmed_paid(&db, date(2025, 6, 10), date(2025, 6, 12), 600_000.0).await;
    lifecycle
        .check_in(&id, &CheckInRequest::default(), date(2025, 6, 10))
        .await
        .unwrap();

    // Prepayment covers everything; a supplied method is not recorded
    let outcome = lifecycle
        .check_out(
            &id,
            &CheckOutRequest {
                method: Some(SettlementMethod::Cash),
                finalize: true,
                ..Default::default()
            },
            date(2025, 6, 12),
        )
        .await
        .unwrap();
    let (b, record) = match outcome {
        CheckOutOutcome::Settled {
            booking,
            settlement,
        } => (booking, settlement),
        other => panic!("Expected Settled, got {:?}", other),
    };
    assert_eq!(b.status, BookingStatus::Completed);
    assert_eq!(record.outstanding, 0.0);
    assert_eq!(record.method, None);
}

#[tokio::test]
async fn test_concurrent_check_in_single_winner() {
    let (_dir, db, lifecycle) = setup().await;
    let id = seed_confirmed_paid(&db, date(2025, 6, 10), date(2025, 6, 14), 800_000.0).await;

    let today = date(2025, 6, 10);
    let l1 = lifecycle.clone();
    let l2 = lifecycle.clone();
    let id1 = id.clone();
    let id2 = id.clone();

    let (r1, r2) = tokio::join!(
        tokio::spawn(async move { l1.check_in(&id1, &CheckInRequest::default(), today).await }),
        tokio::spawn(async move { l2.check_in(&id2, &CheckInRequest::default(), today).await }),
    );
    let results = [r1.unwrap(), r2.unwrap()];

    let winners = results
        .iter()
        .filter(|r| matches!(r, Ok(CheckInOutcome::CheckedIn(_))))
        .count();
    let losers = results
        .iter()
        .filter(|r| matches!(r, Err(BookingError::AlreadyProcessed(_))))
        .count();
    assert_eq!(winners, 1, "exactly one check-in must win: {:?}", results);
    assert_eq!(losers, 1, "the other must observe AlreadyProcessed");

    let stored = booking::find_by_id(&db.pool, &id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::CheckedIn);
}

#[tokio::test]
async fn test_cancel_rules() {
    let (_dir, db, lifecycle) = setup().await;
    let id = seed_confirmed_paid(&db, date(2025, 6, 10), date(2025, 6, 14), 800_000.0).await;

    // A checked-in guest can still cancel (no-show style correction)
    lifecycle
        .check_in(&id, &CheckInRequest::default(), date(2025, 6, 10))
        .await
        .unwrap();
    let cancelled = lifecycle.cancel(&id).await.unwrap();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);

    // A completed booking cannot cancel
    let id2 = seed_confirmed_paid(&db, date(2025, 6, 10), date(2025, 6, 14), 800_000.0).await;
    force_status(&db, &id2, "COMPLETED").await;
    let err = lifecycle.cancel(&id2).await.unwrap_err();
    assert!(matches!(err, BookingError::InvalidState(_)));

    // Cancelling twice is rejected
    let err = lifecycle.cancel(&id).await.unwrap_err();
    assert!(matches!(err, BookingError::InvalidState(_)));
}

#[tokio::test]
async fn test_cancelled_service_request_not_billed() {
    let (_dir, db, lifecycle) = setup().await;
    let id = seed_confirmed_paid(&db, date(2025, 6, 10), date(2025, 6, 12), 400_000.0).await;
    lifecycle
        .check_in(&id, &CheckInRequest::default(), date(2025, 6, 10))
        .await
        .unwrap();

    let kept = service_request::create(
        &db.pool,
        ServiceRequestCreate {
            booking_id: id.clone(),
            service_type: ServiceType::RoomService,
            description: "Dinner".to_string(),
            price: 120_000.0,
        },
    )
    .await
    .unwrap();
    let dropped = service_request::create(
        &db.pool,
        ServiceRequestCreate {
            booking_id: id.clone(),
            service_type: ServiceType::Spa,
            description: "Massage".to_string(),
            price: 300_000.0,
        },
    )
    .await
    .unwrap();

    lifecycle
        .update_service_request_status(&kept.id, ServiceRequestStatus::Completed)
        .await
        .unwrap();
    lifecycle
        .update_service_request_status(&dropped.id, ServiceRequestStatus::Cancelled)
        .await
        .unwrap();

    let folio = lifecycle.folio(&id).await.unwrap();
    assert_eq!(folio.service_charges, 120_000.0);
    assert_eq!(folio.total_owed, 520_000.0);
}

#[tokio::test]
async fn test_service_request_terminal_cannot_reopen() {
    let (_dir, db, lifecycle) = setup().await;
    let id = seed_confirmed_paid(&db, date(2025, 6, 10), date(2025, 6, 12), 400_000.0).await;

    let request = service_request::create(
        &db.pool,
        ServiceRequestCreate {
            booking_id: id.clone(),
            service_type: ServiceType::Transport,
            description: "Airport pickup".to_string(),
            price: 250_000.0,
        },
    )
    .await
    .unwrap();

    // Pending → InProgress → Completed is legal
    lifecycle
        .update_service_request_status(&request.id, ServiceRequestStatus::InProgress)
        .await
        .unwrap();
    let done = lifecycle
        .update_service_request_status(&request.id, ServiceRequestStatus::Completed)
        .await
        .unwrap();
    assert_eq!(done.status, ServiceRequestStatus::Completed);

    // Terminal requests cannot move again
    let err = lifecycle
        .update_service_request_status(&request.id, ServiceRequestStatus::Cancelled)
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::AlreadyProcessed(_)));

    // Moving an open request back to PENDING is rejected
    let other = service_request::create(
        &db.pool,
        ServiceRequestCreate {
            booking_id: id,
            service_type: ServiceType::Other,
            description: "Extra towels".to_string(),
            price: 0.0,
        },
    )
    .await
    .unwrap();
    let err = lifecycle
        .update_service_request_status(&other.id, ServiceRequestStatus::Pending)
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::InvalidInput(_)));
}

#[tokio::test]
async fn test_checkout_negative_extra_charge_rejected() {
    let (_dir, db, lifecycle) = setup().await;
    let id = seed_confirmed_paid(&db, date(2025, 6, 10), date(2025, 6, 12), 400_000.0).await;
    lifecycle
        .check_in(&id, &CheckInRequest::default(), date(2025, 6, 10))
        .await
        .unwrap();

    let err = lifecycle
        .check_out(
            &id,
            &CheckOutRequest {
                extra_charge: Some(-500.0),
                ..Default::default()
            },
            date(2025, 6, 12),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::InvalidInput(_)));

    let stored = booking::find_by_id(&db.pool, &id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::CheckedIn);
}

#[tokio::test]
async fn test_list_bookings_filter_and_search() {
    let (_dir, db, lifecycle) = setup().await;
    let id1 = seed_confirmed_paid(&db, date(2025, 6, 10), date(2025, 6, 14), 800_000.0).await;
    booking::create(
        &db.pool,
        BookingCreate {
            guest_first_name: "An".to_string(),
            guest_last_name: "Nguyen".to_string(),
            guest_email: "an.nguyen@example.com".to_string(),
            check_in_date: date(2025, 7, 1),
            check_out_date: date(2025, 7, 3),
            total_cost: 300_000.0,
            note: None,
            confirmed: false,
        },
    )
    .await
    .unwrap();

    let confirmed = lifecycle
        .list_bookings(Some(BookingStatus::Confirmed), None, 50, 0)
        .await
        .unwrap();
    assert_eq!(confirmed.len(), 1);
    assert_eq!(confirmed[0].id, id1);

    let by_name = lifecycle
        .list_bookings(None, Some("nguyen"), 50, 0)
        .await
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].guest_last_name, "Nguyen");

    let all = lifecycle.list_bookings(None, None, 50, 0).await.unwrap();
    assert_eq!(all.len(), 2);

    // Restartable paging: limit 1 twice covers the full set
    let page1 = lifecycle.list_bookings(None, None, 1, 0).await.unwrap();
    let page2 = lifecycle.list_bookings(None, None, 1, 1).await.unwrap();
    assert_eq!(page1.len(), 1);
    assert_eq!(page2.len(), 1);
    assert_ne!(page1[0].id, page2[0].id);
}

#[tokio::test]
async fn test_unknown_booking_is_not_found() {
    let (_dir, _db, lifecycle) = setup().await;
    let err = lifecycle
        .check_in("missing", &CheckInRequest::default(), date(2025, 6, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::BookingNotFound(_)));
}
