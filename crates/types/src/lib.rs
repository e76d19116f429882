//! Closed scheduling enumerations shared between workflow instances and the
//! commands derived from them.
//!
//! Every enum serializes with its upper snake case wire name (for example
//! `START_PROCESS`), which is also what `as_str` returns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a wire name does not match any variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant, )+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value.trim().to_ascii_uppercase().as_str() {
                    $( $wire => Ok($name::$variant), )+
                    _ => Err(UnknownVariant {
                        kind: $kind,
                        value: value.to_string(),
                    }),
                }
            }
        }
    };
}

wire_enum! {
    /// Kind of trigger that produced a command or a workflow instance.
    CommandType, "command type" {
        /// Fresh run submitted by a user.
        StartProcess => "START_PROCESS",
        StartCurrentTaskProcess => "START_CURRENT_TASK_PROCESS",
        RecoverToleranceFaultProcess => "RECOVER_TOLERANCE_FAULT_PROCESS",
        RecoverSuspendedProcess => "RECOVER_SUSPENDED_PROCESS",
        StartFailureTaskProcess => "START_FAILURE_TASK_PROCESS",
        ComplementData => "COMPLEMENT_DATA",
        Scheduler => "SCHEDULER",
        RepeatRunning => "REPEAT_RUNNING",
        Pause => "PAUSE",
        Stop => "STOP",
        RecoverWaitingThread => "RECOVER_WAITING_THREAD",
        RecoverSerialWait => "RECOVER_SERIAL_WAIT",
        ExecuteTask => "EXECUTE_TASK",
        /// Follow-on command produced at runtime by a running workflow.
        DynamicGeneration => "DYNAMIC_GENERATION",
    }
}

wire_enum! {
    /// Which part of the target workflow a command runs.
    #[derive(Default)]
    TaskDependType, "task depend type" {
        TaskOnly => "TASK_ONLY",
        TaskPre => "TASK_PRE",
        #[default]
        TaskPost => "TASK_POST",
    }
}

wire_enum! {
    /// What the workflow does with remaining tasks after a task fails.
    #[derive(Default)]
    FailureStrategy, "failure strategy" {
        End => "END",
        #[default]
        Continue => "CONTINUE",
    }
}

wire_enum! {
    /// Which workflow outcomes raise an alert.
    #[derive(Default)]
    WarningType, "warning type" {
        #[default]
        None => "NONE",
        Success => "SUCCESS",
        Failure => "FAILURE",
        All => "ALL",
        Global => "GLOBAL",
    }
}

wire_enum! {
    /// Scheduling priority of a workflow instance or command.
    #[derive(Default)]
    Priority, "priority" {
        Highest => "HIGHEST",
        High => "HIGH",
        #[default]
        Medium => "MEDIUM",
        Low => "LOW",
        Lowest => "LOWEST",
    }
}

wire_enum! {
    /// Direction of a parameter relative to the task that declares it.
    #[derive(Default)]
    Direct, "direct" {
        #[default]
        In => "IN",
        Out => "OUT",
    }
}

/// Declared type of a parameter value.
///
/// Unknown type names deserialize to [`DataType::Unknown`] so that snapshots
/// written by newer schedulers still load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    #[default]
    Varchar,
    Integer,
    Long,
    Float,
    Double,
    Date,
    Time,
    Timestamp,
    Boolean,
    List,
    File,
    #[serde(other)]
    Unknown,
}
