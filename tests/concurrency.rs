//! Concurrency stress test: many vendors and customers against one pool,
//! asserting the pool's numeric invariants hold after a run to exhaustion.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;

use ticket_market::app_config::AppConfig;
use ticket_market::domain::{ConfigurationSpec, EventSpec};
use ticket_market::{AppState, LifecycleState};

#[tokio::test]
async fn runs_to_exhaustion_preserving_invariants() {
    let state = AppState::new(Arc::new(AppConfig::default()));

    state
        .config_store
        .set(ConfigurationSpec {
            max_capacity: 500,
            total_tickets: 500,
            release_rate: 7,
            retrieval_rate: 5,
            events: vec![
                EventSpec {
                    name: "Concert".into(),
                    price: Decimal::new(5000, 2),
                },
                EventSpec {
                    name: "Derby".into(),
                    price: Decimal::new(7500, 2),
                },
            ],
        })
        .await
        .unwrap();

    state.controller.start().await.unwrap();

    for _ in 0..500 {
        if state.controller.status().await.state == LifecycleState::Exhausted {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    let status = state.controller.status().await;
    assert_eq!(status.state, LifecycleState::Exhausted);

    let snapshot = state.pool.snapshot().await;
    assert_eq!(snapshot.tickets_added, 500);
    assert_eq!(snapshot.tickets_sold, 500);
    assert_eq!(snapshot.current_count, 0);

    let transactions = state.transactions.all();
    assert_eq!(transactions.len(), 500);

    let configured_price = |name: &str| {
        if name == "Concert" {
            Decimal::new(5000, 2)
        } else {
            Decimal::new(7500, 2)
        }
    };
    for tx in &transactions {
        assert_eq!(tx.price, configured_price(&tx.event_name));
        assert_eq!(tx.ticket_count, 1);
    }

    let total_price: Decimal = transactions.iter().map(|t| t.price).sum();
    assert!(total_price > Decimal::ZERO);
}

#[tokio::test]
async fn stop_after_first_purchase_preserves_invariants() {
    let state = AppState::new(Arc::new(AppConfig::default()));

    state
        .config_store
        .set(ConfigurationSpec {
            max_capacity: 10,
            total_tickets: 10,
            release_rate: 2,
            retrieval_rate: 2,
            events: vec![
                EventSpec {
                    name: "A".into(),
                    price: Decimal::new(500, 2),
                },
                EventSpec {
                    name: "B".into(),
                    price: Decimal::new(750, 2),
                },
            ],
        })
        .await
        .unwrap();

    state.controller.start().await.unwrap();

    for _ in 0..200 {
        if !state.transactions.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    state.controller.stop().await.unwrap();

    let snapshot = state.pool.snapshot().await;
    assert!(snapshot.tickets_added <= 10);
    assert_eq!(snapshot.current_count, snapshot.tickets_added - snapshot.tickets_sold);

    for tx in state.transactions.all() {
        assert!(tx.event_name == "A" || tx.event_name == "B");
    }
}

#[tokio::test]
async fn requesting_more_than_available_yields_exact_partial() {
    use ticket_market::TicketPool;
    use ticket_market::events::Broadcaster;
    use ticket_market::transactions::TransactionLog;

    let broadcaster = Arc::new(Broadcaster::new());
    let transactions = Arc::new(TransactionLog::new());
    let pool = Arc::new(TicketPool::new(transactions, broadcaster));

    let configuration = ticket_market::domain::ConfigurationSpec {
        max_capacity: 5,
        total_tickets: 5,
        release_rate: 5,
        retrieval_rate: 5,
        events: vec![EventSpec {
            name: "A".into(),
            price: Decimal::new(500, 2),
        }],
    }
    .into_configuration();

    pool.activate(&configuration).await;
    pool.deposit(1, "A", Decimal::new(500, 2), 3).await;

    let withdrawal = pool.withdraw(1, 100).await;
    assert_eq!(withdrawal.purchased, 3);
}
