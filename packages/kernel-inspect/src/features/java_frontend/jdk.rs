//! Built-in knowledge of the JDK surface kernels commonly touch
//!
//! Library classes are not parsed; calls into them resolve to body-less stub
//! methods whose nativeness and result types come from these tables.

use lazy_static::lazy_static;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::features::program_model::TypeRef;

pub const OBJECT: &str = "java.lang.Object";

/// class → member → value
type MemberTable<V> = FxHashMap<&'static str, FxHashMap<&'static str, V>>;

fn member_table<V: Copy>(entries: &[(&'static str, &'static str, V)]) -> MemberTable<V> {
    let mut table: MemberTable<V> = FxHashMap::default();
    for (class, member, value) in entries {
        table.entry(*class).or_default().insert(*member, *value);
    }
    table
}

fn lookup<V: Copy>(table: &MemberTable<V>, class: &str, member: &str) -> Option<V> {
    table.get(class).and_then(|members| members.get(member)).copied()
}

lazy_static! {
    /// `java.lang` classes visible without an import
    static ref JAVA_LANG: FxHashSet<&'static str> = [
        "Object", "String", "StringBuilder", "StringBuffer", "System", "Runtime", "Process",
        "ProcessBuilder", "Thread", "Math", "StrictMath", "Integer", "Long", "Short", "Byte",
        "Float", "Double", "Character", "Boolean", "Number", "Class", "Iterable", "Runnable",
        "Comparable", "CharSequence", "Throwable", "Exception", "Error", "RuntimeException",
        "IllegalArgumentException", "IllegalStateException", "ArithmeticException",
        "ArrayIndexOutOfBoundsException", "IndexOutOfBoundsException", "NullPointerException",
        "UnsupportedOperationException", "InterruptedException", "ClassCastException",
        "CloneNotSupportedException", "Override", "Deprecated", "SuppressWarnings",
        "FunctionalInterface", "SafeVarargs", "Void",
    ]
    .into_iter()
    .collect();

    /// Methods declared `native` in the JDK
    static ref NATIVE_METHODS: MemberTable<()> = member_table(&[
        ("java.lang.System", "arraycopy", ()),
        ("java.lang.System", "nanoTime", ()),
        ("java.lang.System", "currentTimeMillis", ()),
        ("java.lang.System", "identityHashCode", ()),
        ("java.lang.Object", "hashCode", ()),
        ("java.lang.Object", "getClass", ()),
        ("java.lang.Object", "clone", ()),
        ("java.lang.Object", "notify", ()),
        ("java.lang.Object", "notifyAll", ()),
        ("java.lang.Object", "wait", ()),
        ("java.lang.Thread", "currentThread", ()),
        ("java.lang.Thread", "yield", ()),
        ("java.lang.Thread", "sleep", ()),
        ("java.lang.Float", "floatToRawIntBits", ()),
        ("java.lang.Float", "intBitsToFloat", ()),
        ("java.lang.Double", "doubleToRawLongBits", ()),
        ("java.lang.Double", "longBitsToDouble", ()),
        ("java.lang.StrictMath", "sin", ()),
        ("java.lang.StrictMath", "cos", ()),
        ("java.lang.StrictMath", "tan", ()),
        ("java.lang.StrictMath", "sqrt", ()),
        ("java.lang.StrictMath", "exp", ()),
        ("java.lang.StrictMath", "log", ()),
        ("java.lang.Runtime", "availableProcessors", ()),
        ("java.lang.Runtime", "freeMemory", ()),
        ("java.lang.Runtime", "totalMemory", ()),
    ]);

    /// Result types of frequently used JDK methods
    static ref RETURN_TYPES: MemberTable<&'static str> = member_table(&[
        ("java.lang.System", "nanoTime", "long"),
        ("java.lang.System", "currentTimeMillis", "long"),
        ("java.lang.System", "identityHashCode", "int"),
        ("java.lang.System", "getenv", "java.lang.String"),
        ("java.lang.System", "getProperty", "java.lang.String"),
        ("java.lang.Runtime", "getRuntime", "java.lang.Runtime"),
        ("java.lang.Runtime", "availableProcessors", "int"),
        ("java.lang.Runtime", "exec", "java.lang.Process"),
        ("java.lang.Thread", "currentThread", "java.lang.Thread"),
        ("java.lang.Object", "hashCode", "int"),
        ("java.lang.Object", "toString", "java.lang.String"),
        ("java.lang.Object", "equals", "boolean"),
        ("java.lang.Object", "getClass", "java.lang.Class"),
        ("java.lang.Class", "getDeclaredMethod", "java.lang.reflect.Method"),
        ("java.lang.Class", "getMethod", "java.lang.reflect.Method"),
        ("java.lang.Class", "getDeclaredField", "java.lang.reflect.Field"),
        ("java.lang.Math", "sqrt", "double"),
        ("java.lang.Math", "sin", "double"),
        ("java.lang.Math", "cos", "double"),
        ("java.lang.Math", "tan", "double"),
        ("java.lang.Math", "exp", "double"),
        ("java.lang.Math", "log", "double"),
        ("java.lang.Math", "pow", "double"),
        ("java.lang.Math", "floor", "double"),
        ("java.lang.Math", "ceil", "double"),
        ("java.lang.Math", "atan2", "double"),
        ("java.lang.Float", "floatToRawIntBits", "int"),
        ("java.lang.Float", "intBitsToFloat", "float"),
        ("java.lang.Double", "doubleToRawLongBits", "long"),
        ("java.lang.Double", "longBitsToDouble", "double"),
        ("java.lang.Integer", "parseInt", "int"),
        ("java.lang.String", "length", "int"),
        ("java.lang.String", "charAt", "char"),
    ]);

    /// Types of well-known static fields
    static ref STATIC_FIELDS: MemberTable<&'static str> = member_table(&[
        ("java.lang.System", "out", "java.io.PrintStream"),
        ("java.lang.System", "err", "java.io.PrintStream"),
        ("java.lang.System", "in", "java.io.InputStream"),
        ("java.lang.Math", "PI", "double"),
        ("java.lang.Math", "E", "double"),
        ("java.lang.Integer", "MAX_VALUE", "int"),
        ("java.lang.Integer", "MIN_VALUE", "int"),
        ("java.lang.Long", "MAX_VALUE", "long"),
        ("java.lang.Long", "MIN_VALUE", "long"),
        ("java.lang.Float", "MAX_VALUE", "float"),
        ("java.lang.Float", "MIN_VALUE", "float"),
        ("java.lang.Double", "MAX_VALUE", "double"),
        ("java.lang.Double", "MIN_VALUE", "double"),
    ]);

    /// `java.lang.Object` instance methods reachable through any receiver
    static ref OBJECT_METHODS: FxHashSet<&'static str> = [
        "hashCode", "equals", "toString", "getClass", "clone", "notify", "notifyAll", "wait",
    ]
    .into_iter()
    .collect();
}

/// Qualified name of a `java.lang` class known by simple name
pub fn java_lang_class(simple_name: &str) -> Option<String> {
    JAVA_LANG
        .contains(simple_name)
        .then(|| format!("java.lang.{}", simple_name))
}

pub fn is_native(class: &str, method: &str) -> bool {
    lookup(&NATIVE_METHODS, class, method).is_some()
}

pub fn return_type(class: &str, method: &str) -> Option<TypeRef> {
    lookup(&RETURN_TYPES, class, method).map(TypeRef::new)
}

pub fn static_field_type(class: &str, field: &str) -> Option<TypeRef> {
    lookup(&STATIC_FIELDS, class, field).map(TypeRef::new)
}

pub fn is_object_method(name: &str) -> bool {
    OBJECT_METHODS.contains(name)
}
