pub mod factoring;
pub mod letter_of_credit;
pub mod sensitivity;

use serde_json::Value;

pub type CommandResult = Result<Value, Box<dyn std::error::Error>>;
