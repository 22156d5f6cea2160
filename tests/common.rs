//! Common test utilities: workflow sources and helpers to compile them.
use serde_json::Value;
use stepwright::prelude::*;

/// One remote call, nothing else.
#[allow(dead_code)]
pub const SINGLE_TASK_YAML: &str = r#"
states:
  - name: s1
    tech:
      get: /x
      service: svc
"#;

/// A choice with an explicit default, followed by two waits.
#[allow(dead_code)]
pub const CHOICE_YAML: &str = r#"
states:
  - name: c1
    choices:
      - var: $.x
        oper: BooleanEquals
        value: true
        goto: s2
    default: s3
  - name: s2
    wait: 5
    goto: End
  - name: s3
    wait: 1
"#;

/// A task whose failures are handled by a catch branch.
#[allow(dead_code)]
pub const CATCH_YAML: &str = r#"
comment: Order processing
states:
  - name: Create Order
    tech:
      service: orders
      post: /order
      body:
        reference: $.reference
      timeout: 30
catch:
  - name: notify
    tech:
      service: mailer
      post: /mail
      form-data:
        subject: order failed
  - name: cool down
    wait: 10
"#;

/// Exercises every action kind, wrapped conditions and a fallthrough default.
#[allow(dead_code)]
pub const FULL_YAML: &str = r#"
comment: Invoice reminder
states:
  - name: fetch invoice
    tech:
      service: billing
      get: /invoice/{id}
      uri_params:
        id: $.invoice_id
      query_params:
        expand: [lines]
  - name: paid?
    choices:
      - not:
          var: $.fetch_invoice.result.due
          oper: IsPresent
          value: true
        goto: End
      - and:
          var: $.fetch_invoice.result.paid
          oper: BooleanEquals
          value: false
        goto: remind
  - name: wait a day
    wait: 86400
    goto: fetch invoice
  - name: remind
    tech:
      service: mailer
      post: /remind
"#;

/// Parses a YAML source, panicking on malformed fixtures.
#[allow(dead_code)]
pub fn document(yaml: &str) -> Value {
    load_str(yaml).expect("fixture should be valid YAML")
}

/// Compiles a YAML source with the default compiler.
#[allow(dead_code)]
pub fn compile(name: &str, yaml: &str) -> Result<StateMachine, CompileError> {
    Compiler::default().compile(name, &document(yaml))
}

/// Compiles a YAML source and returns the document as a JSON tree.
#[allow(dead_code)]
pub fn compile_to_json(name: &str, yaml: &str) -> Value {
    let machine = compile(name, yaml).expect("Failed to compile");
    serde_json::to_value(&machine).expect("Failed to serialize")
}
