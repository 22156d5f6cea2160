//! # Stepwright - Workflow DSL Compiler
//!
//! **Stepwright** compiles a small, declarative YAML workflow language into complete
//! state-machine documents for a step-based workflow engine. A workflow is an ordered list
//! of business actions (remote calls, waits, conditional branches); the compiler turns it
//! into named states with explicit transitions, global error handling and termination.
//!
//! ## Core Workflow
//!
//! 1.  **Load**: Parse the workflow source with [`dsl::load_str`] or [`dsl::load_file`]
//!     (or locate it by name with [`dsl::SourceLocator`]).
//! 2.  **Compile**: Build a [`Compiler`](compiler::Compiler) and call `compile` for each
//!     workflow, or hand several sources to [`batch::compile_batch`].
//! 3.  **Emit**: Render the resulting [`StateMachine`](machine::StateMachine) documents
//!     with [`emit::write_documents`].
//!
//! ## The DSL
//!
//! ```yaml
//! comment: Invoice reminder
//! states:
//!   - name: fetch invoice
//!     tech:
//!       service: billing
//!       get: /invoice/{id}
//!       uri_params:
//!         id: $.invoice_id
//!   - name: paid?
//!     choices:
//!       - var: $.fetch_invoice.result.paid
//!         oper: BooleanEquals
//!         value: true
//!         goto: End
//!   - name: remind later
//!     wait: 86400
//! catch:
//!   - name: alert
//!     tech:
//!       service: mailer
//!       post: /send
//! ```
//!
//! Each action compiles to one state. Actions without a `goto` fall through to the next
//! one; the last action ends the machine. Every remote call redirects its failures to a
//! shared fallback state, which either succeeds or enters the compiled `catch` branch.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stepwright::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = std::fs::read_to_string("flows/reminder.yml")?;
//!     let document = load_str(&source)?;
//!
//!     let compiler = Compiler::builder().with_version("1.0").build();
//!     let machine = compiler.compile("reminder", &document)?;
//!
//!     let mut stdout = std::io::stdout();
//!     write_documents(&mut stdout, [&machine], OutputFormat::Json)?;
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod compiler;
pub mod config;
pub mod dsl;
pub mod emit;
pub mod error;
pub mod machine;
pub mod prelude;
