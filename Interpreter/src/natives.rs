use std::time::{SystemTime, UNIX_EPOCH};

use objects::func_obj::NativeFuncObj;
use objects::Value;

/// The native functions installed into the global environment when an
/// interpreter session starts.
pub(crate) fn prelude() -> Vec<NativeFuncObj> {
  vec![NativeFuncObj {
    name: String::from("clock"),
    arity: 0,
    body: native_clock,
  }]
}

/// Returns the current wall-clock time in seconds.
fn native_clock(_args: &[Value]) -> Result<Value, String> {
  match SystemTime::now().duration_since(UNIX_EPOCH) {
    Ok(elapsed) => Ok(Value::Number(elapsed.as_secs_f64())),
    Err(_) => Err(String::from("system clock went backwards")),
  }
}
