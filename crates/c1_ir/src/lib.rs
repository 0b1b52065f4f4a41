pub mod block;
pub mod builder;
pub mod display;
pub mod instr;
pub mod module;
pub mod operand;
pub mod types;
pub mod verify;

use c1_type::Id;

pub use block::{Block, Terminator};
pub use builder::FunctionBuilder;
pub use instr::{BinaryOp, CastOp, ComparePredicate, Instr, UnaryOp};
pub use module::{FunctionIr, GlobalData, GlobalInit, IrModule, LocalData, TempData};
pub use operand::{ConstValue, Operand};
pub use types::{IrType, ScalarType};
pub use verify::{VerifyError, VerifyResult, verify_module};

/// Unique identifier for a temporary value within a function.
pub type TempId = Id<TempData>;

/// Unique identifier for a stack slot within a function.
pub type LocalId = Id<LocalData>;

/// Unique identifier for a basic block within a function.
pub type BlockId = Id<Block>;

/// Unique identifier for a module-level variable.
pub type GlobalId = Id<GlobalData>;

/// Unique identifier for a function of the module.
pub type FunctionId = Id<FunctionIr>;
