//! Write-call interception for Rowstamp.
//!
//! `rowstamp-intercept` is the hook layer between application code and the
//! data-access runtime. It sees every outgoing write once, classifies it by
//! the statement descriptor it carries, injects the standard bookkeeping
//! fields into entity-shaped arguments, and hands the call on unchanged in
//! shape and count.
//!
//! # Role In The Architecture
//!
//! - **Classification**: a write call is classified exactly once, from the
//!   first statement descriptor found in its argument list.
//! - **Injection**: insert and update passes apply per-field policies to
//!   each candidate record (see [`AutoFillInterceptor`]).
//! - **Transparency**: the next execution stage receives the same argument
//!   list and its result is returned unmodified.
//!
//! # Example
//!
//! ```ignore
//! use rowstamp_core::StaticIdentity;
//! use rowstamp_intercept::{Argument, AutoFillInterceptor, StatementDescriptor, StatementKind, WriteCall};
//!
//! let interceptor = AutoFillInterceptor::new(StaticIdentity::new("admin"));
//! let mut call = WriteCall::new(vec![
//!     Argument::Statement(StatementDescriptor::new("sys_user.insert", StatementKind::Insert)),
//!     Argument::Record(Box::new(user)),
//! ]);
//! let rows = interceptor.intercept(&mut call, |call| executor.run(call))?;
//! ```

pub mod call;
pub mod interceptor;

pub use call::{
    Argument, PARAM_ENTITY_KEY, PARAM_FIRST_POSITIONAL_KEY, ParamMap, StatementDescriptor,
    StatementKind, WriteCall,
};
pub use interceptor::AutoFillInterceptor;
