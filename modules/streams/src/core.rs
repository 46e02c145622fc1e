/// Cardinality classification of a stream.
mod cardinality;
/// Aggregate unresolved-failure error.
mod checked_stream_error;
/// Per-element state carried through the chain.
mod element;
/// Caller-facing failure message value.
mod failure_reason;
/// Source adapter implementations.
mod source;
/// Stage logic implementations.
mod stage;
/// Failure record tagged with the producing stage.
mod stage_failure;
/// Stage identity within a chain.
mod stage_id;
/// Built-in stage kinds.
mod stage_kind;
/// Stream pipeline type and terminal consumers.
mod stream;
/// Stream error definitions.
mod stream_error;
/// Policy for unresolved errored elements.
mod unresolved_policy;

use alloc::boxed::Box;
use core::any::Any;

pub use cardinality::Cardinality;
pub use checked_stream_error::CheckedStreamError;
pub use element::Element;
pub use failure_reason::FailureReason;
pub use stage_failure::StageFailure;
pub use stage_id::StageId;
pub use stage_kind::StageKind;
pub use stream::Stream;
pub use stream_error::StreamError;
pub use unresolved_policy::UnresolvedPolicy;

type DynValue = Box<dyn Any + Send + Sync + 'static>;

/// Pulls raw elements from the underlying producer.
///
/// Exhaustion is signalled with `None`; pulling past exhaustion keeps
/// returning `None` and never panics.
trait SourceLogic: Send {
  fn pull(&mut self) -> Option<DynValue>;
}

/// One pipeline step; consumes one upstream element and produces zero or
/// one downstream element.
trait StageLogic: Send {
  fn apply(&mut self, input: Element<DynValue>) -> Result<Option<Element<DynValue>>, StreamError>;
}

fn downcast_value<In>(value: DynValue) -> Result<In, StreamError>
where
  In: Any + Send + Sync + 'static, {
  match value.downcast::<In>() {
    | Ok(value) => Ok(*value),
    | Err(_) => Err(StreamError::TypeMismatch),
  }
}
