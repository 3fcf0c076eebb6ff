use assert_cmd::Command;

#[test]
fn openapi_lists_both_resources() {
    let output = Command::cargo_bin("grubdash")
        .unwrap()
        .arg("openapi")
        .env("GRUBDASH_ENV", "local")
        .env("GRUBDASH_CONFIG_DIR", env!("CARGO_MANIFEST_DIR"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let document: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(document["paths"]["/dishes"]["post"].is_object());
    assert!(document["paths"]["/dishes/{dishId}"]["put"].is_object());
    assert!(document["paths"]["/orders/{orderId}"]["delete"].is_object());
    assert_eq!(
        document["components"]["schemas"]["OrderStatus"]["enum"],
        serde_json::json!(["pending", "preparing", "out-for-delivery", "delivered"])
    );
}

#[test]
fn unknown_environment_fails() {
    Command::cargo_bin("grubdash")
        .unwrap()
        .arg("openapi")
        .env("GRUBDASH_ENV", "qa")
        .env("GRUBDASH_CONFIG_DIR", env!("CARGO_MANIFEST_DIR"))
        .assert()
        .failure();
}
