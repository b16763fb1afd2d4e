//! Member model consumed by the mockgen emitter.
//!
//! The parsing front end describes each interface as an ordered list of
//! members. This crate holds those descriptions plus `TypeExpr`, the parsed
//! form of the type text they carry:
//! - `Member` and its variants (`VariableModel`, `MethodModel`, `TypeAliasModel`)
//! - `ParamModel` for parameters and generic parameters
//! - `InterfaceModel` and the `MockInput` JSON document

pub mod type_expr;
pub use type_expr::{ClosureShape, FunctionType, PathSegment, TupleElement, TypeExpr};

pub mod param;
pub use param::ParamModel;

pub mod member;
pub use member::{
    ArgumentsHistoryDescriptor, HandlerDescriptor, InitKind, Member, MemberCommon, MemberFlags,
    MemberKind, MethodModel, ReactiveWrapperDescriptor, SubjectKind, TypeAliasModel,
    VariableModel,
};

pub mod interface;
pub use interface::{CustomModifier, DeclKind, InterfaceModel, MockInput};

#[cfg(test)]
#[path = "../tests/type_expr_tests.rs"]
mod type_expr_tests;

#[cfg(test)]
#[path = "../tests/member_tests.rs"]
mod member_tests;
