//! Integration Tests für den JSON-RPC Dispatcher im Device

mod common;

use common::{Fixture, MockSink, config};
use esp_core::{Dispatcher, RegistryError, Reply, Request};
use serde_json::{Value, json};

// ============================================================================
// Tests: Built-in Handler der Anwendung
// ============================================================================

#[test]
fn test_e3_unknown_method_and_loop_unaffected() {
    let mut fx = Fixture::new(config(100, 0, None));
    fx.device.tick();
    assert_eq!(fx.led.toggle_count(), 1);

    fx.deliver(r#"{"id":1,"method":"Foo.Bar","params":{}}"#);
    assert_eq!(
        fx.sink.responses(),
        [json!({"id": 1, "error": {"code": -32601, "message": "method not found"}})]
    );

    fx.advance_and_tick(100);
    fx.advance_and_tick(100);
    assert_eq!(fx.led.toggle_count(), 3);
}

#[test]
fn test_e4_toggle_twice_restores_state() {
    let mut fx = Fixture::new(config(0, 0, None));
    let initial = fx.aux.is_on();

    fx.deliver(r#"{"id":1,"method":"LED.Toggle"}"#);
    assert_eq!(fx.aux.is_on(), !initial);
    fx.deliver(r#"{"id":2,"method":"LED.Toggle"}"#);

    assert_eq!(fx.aux.is_on(), initial);
    assert_eq!(fx.aux.toggle_count(), 2);
    assert_eq!(
        fx.sink.responses(),
        [json!({"id": 1, "result": null}), json!({"id": 2, "result": null})]
    );
}

#[test]
fn test_led_set_on_and_default_off() {
    let mut fx = Fixture::new(config(0, 0, None));

    fx.deliver(r#"{"id":10,"method":"LED.Set","params":{"on":true}}"#);
    assert!(fx.aux.is_on());

    // fehlendes "on" → Default aus
    fx.deliver(r#"{"id":11,"method":"LED.Set","params":{}}"#);
    assert!(!fx.aux.is_on());

    let responses = fx.sink.responses();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["result"], Value::Null);
}

#[test]
fn test_led_set_never_touches_indicator() {
    let mut fx = Fixture::new(config(100, 0, None));
    fx.device.tick();
    let toggles = fx.led.toggle_count();
    fx.deliver(r#"{"id":1,"method":"LED.Set","params":{"on":false}}"#);
    fx.deliver(r#"{"id":2,"method":"LED.Toggle"}"#);
    assert_eq!(fx.led.toggle_count(), toggles);
    assert!(fx.led.is_on());
}

#[test]
fn test_output_failure_yields_internal_error() {
    let mut fx = Fixture::new(config(0, 0, None));
    fx.aux.fail_next_write();
    fx.deliver(r#"{"id":4,"method":"LED.Toggle"}"#);
    assert_eq!(fx.sink.responses()[0]["error"]["code"], -32603);
    assert_eq!(fx.aux.toggle_count(), 0);
}

#[test]
fn test_shadow_delta_as_call_has_no_response() {
    let mut fx = Fixture::new(config(100, 0, None));
    fx.deliver(r#"{"id":9,"method":"Shadow.Delta","params":{"app":{"blink_period_ms":300}}}"#);
    assert!(fx.sink.responses().is_empty());
    assert_eq!(fx.device.state().indicator.period().as_millis(), 300);
}

#[test]
fn test_notifications_never_answered() {
    let mut fx = Fixture::new(config(0, 0, None));
    fx.deliver(r#"{"method":"LED.Toggle"}"#);
    fx.deliver(r#"{"method":"Does.Not.Exist"}"#);
    assert!(fx.aux.is_on());
    assert!(fx.sink.raw().is_empty());
}

#[test]
fn test_malformed_frame_is_dropped_and_parser_recovers() {
    let mut fx = Fixture::new(config(0, 0, None));
    fx.deliver("{{{ not json");
    fx.deliver(r#"{"id":"a","method":"LED.Toggle""#);
    fx.deliver(r#"{"id":"b","method":"LED.Toggle"}"#);
    assert_eq!(fx.sink.responses(), [json!({"id": "b", "result": null})]);
    assert_eq!(fx.aux.toggle_count(), 1);
}

#[test]
fn test_oversized_frame_is_dropped() {
    let mut fx = Fixture::new(config(0, 0, None));
    let padding = "x".repeat(400);
    fx.deliver(&format!(r#"{{"id":1,"method":"LED.Toggle","params":{{"pad":"{padding}"}}}}"#));
    fx.deliver(r#"{"id":2,"method":"LED.Toggle"}"#);
    assert_eq!(fx.sink.responses(), [json!({"id": 2, "result": null})]);
}

#[test]
fn test_rpc_list_and_sys_info() {
    let mut fx = Fixture::new(config(0, 0, None));
    fx.deliver(r#"{"id":1,"method":"rpc.list"}"#);
    fx.deliver(r#"{"id":2,"method":"Sys.Info"}"#);
    assert_eq!(
        fx.sink.responses(),
        [
            json!({"id": 1, "result": ["rpc.list", "Sys.Info", "Shadow.Delta", "LED.Set", "LED.Toggle"]}),
            json!({"id": 2, "result": {"fw_version": "1.0.0"}}),
        ]
    );
}

#[test]
fn test_crlf_line_endings() {
    let mut fx = Fixture::new(config(0, 0, None));
    fx.deliver("{\"id\":1,\"method\":\"LED.Toggle\"}\r");
    assert_eq!(fx.aux.toggle_count(), 1);
}

// ============================================================================
// Tests: Dispatcher Registry
// ============================================================================

fn noop(_request: &Request<'_>, _ctx: &mut ()) -> Reply {
    Reply::ok()
}

#[test]
fn test_duplicate_registration_is_fatal() {
    let mut rpc: Dispatcher<MockSink, ()> = Dispatcher::new(MockSink::default(), "1.0.0");
    rpc.register("LED.Toggle", noop).unwrap();
    assert_eq!(rpc.register("LED.Toggle", noop), Err(RegistryError::DuplicateMethod));
    assert_eq!(rpc.register("Sys.Info", noop), Err(RegistryError::DuplicateMethod));
    assert!(rpc.is_registered("LED.Toggle"));
    assert!(!rpc.is_registered("led.toggle"));
}

#[test]
fn test_outbound_call_ids_increase() {
    let sink = MockSink::default();
    let mut rpc: Dispatcher<MockSink, ()> = Dispatcher::new(sink.clone(), "1.0.0");
    assert_eq!(rpc.call("Shadow.Get", &json!({})), 1);
    assert_eq!(rpc.call("Shadow.Get", &json!({})), 2);
    rpc.notify("Log", &json!({"msg": "hi"}));
    assert_eq!(
        sink.frames(),
        [
            json!({"id": 1, "method": "Shadow.Get", "params": {}}),
            json!({"id": 2, "method": "Shadow.Get", "params": {}}),
            json!({"method": "Log", "params": {"msg": "hi"}}),
        ]
    );
}
