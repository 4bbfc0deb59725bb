//! GET /api/locations: the static division/district/upazila tree.

use integration_tests::{get, spawn_app};

#[tokio::test]
async fn location_tree_is_served_in_order() {
    let app = spawn_app().await;
    let (status, body) = get(&app.router, "/api/locations").await;

    assert_eq!(status, 200);
    let divisions = body.as_array().expect("array body");
    assert_eq!(divisions.len(), 4);
    assert_eq!(divisions[0]["key"], "dhaka");
    assert_eq!(divisions[0]["name"], "ঢাকা");

    let dhaka_districts = divisions[0]["districts"].as_array().unwrap();
    assert_eq!(dhaka_districts.len(), 3);
    let gazipur = dhaka_districts
        .iter()
        .find(|d| d["key"] == "gazipur")
        .expect("gazipur under dhaka");
    assert!(gazipur["upazilas"]
        .as_array()
        .unwrap()
        .iter()
        .any(|u| u == "টঙ্গী"));
}

#[tokio::test]
async fn every_district_carries_upazilas() {
    let app = spawn_app().await;
    let (_, body) = get(&app.router, "/api/locations").await;

    for division in body.as_array().unwrap() {
        for district in division["districts"].as_array().unwrap() {
            assert!(
                !district["upazilas"].as_array().unwrap().is_empty(),
                "district {} has no upazilas",
                district["key"]
            );
        }
    }
}
