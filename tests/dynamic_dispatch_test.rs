mod common;

use common::{apple_pay, apple_pay_params, card_params, merchant_page, signing_gateway, status_query};
use fortpay::application::method::PaymentMethod;
use fortpay::domain::parameters::Parameters;
use std::sync::Arc;

#[tokio::test]
async fn test_variants_as_trait_objects() {
    let gateway = signing_gateway()
        .with_authorization(Parameters::new().with("status", "02"))
        .with_authorization(Parameters::new().with("status", "02"));

    let methods: Vec<(Box<dyn PaymentMethod>, Parameters)> = vec![
        (Box::new(apple_pay(&gateway)) as Box<dyn PaymentMethod>, apple_pay_params()),
        (Box::new(merchant_page(&gateway)) as Box<dyn PaymentMethod>, card_params()),
    ];

    for (method, params) in methods {
        let response = method.authorize(params).await.unwrap();
        assert_eq!(response.get_str("status"), Some("02"));
    }

    let requests = gateway.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].1.get_str("digital_wallet"), Some("APPLE_PAY"));
    assert!(!requests[1].1.contains_key("digital_wallet"));
}

#[tokio::test]
async fn test_method_shared_across_tasks() {
    let mut gateway = signing_gateway();
    for _ in 0..8 {
        gateway = gateway.with_status(
            Parameters::new()
                .with("merchant_reference", "ORD-1001")
                .with("transaction_status", "14"),
        );
    }
    let method: Arc<dyn PaymentMethod> = Arc::new(apple_pay(&gateway));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let method = Arc::clone(&method);
            tokio::spawn(async move { method.check_transaction_status(status_query("ORD-1001")).await })
        })
        .collect();

    for handle in handles {
        let response = handle.await.unwrap().unwrap();
        assert_eq!(response.transaction_status().as_deref(), Some("14"));
    }
    assert_eq!(gateway.dispatch_count(), 8);
}
