//! User-facing message texts

pub const RECURSION: &str = "TornadoVM: Recursive calls are not supported";
pub const THROW: &str = "TornadoVM: Exceptions cannot be thrown inside a kernel";
pub const TRY_CATCH: &str = "TornadoVM: try/catch is not supported; the catch body is unreachable and exceptions raised in the try body go unhandled";
pub const THROWS_CLAUSE: &str = "TornadoVM: Kernel methods cannot declare thrown exceptions";
pub const NATIVE_CALL: &str = "TornadoVM: Native method calls are not supported";
pub const NON_VOID_RETURN: &str = "TornadoVM: Kernel entry points must return void; non-void is only valid for inlined helpers";
pub const STATIC_TASK_GRAPH: &str = "TornadoVM: TornadoVM currently does not support static TaskGraph and Tasks";
pub const ASSERT: &str = "TornadoVM: Assert statement is not supported";
pub const EXTERNAL_LIBRARY: &str = "TornadoVM: External library calls cannot be analyzed and may not run on the device";
pub const HELPER_UNRESOLVABLE: &str = "Helper method cannot be analyzed";

pub fn unsupported_data_type(type_text: &str) -> String {
    format!("TornadoVM: Unsupported data type '{}'", type_text)
}

pub fn restricted_call(namespace: &str) -> String {
    format!("TornadoVM: TornadoVM does not support calls into '{}'", namespace)
}

pub fn throws_clause(exception: &str) -> String {
    format!("{}\n{}", THROWS_CLAUSE, exception)
}

pub fn helper_unresolvable(reason: &str) -> String {
    format!("{}: {}", HELPER_UNRESOLVABLE, reason)
}
