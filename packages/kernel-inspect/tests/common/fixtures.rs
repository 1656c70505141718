//! Java fixtures
//!
//! Small compilation units exercising one kernel restriction each.

/// Annotation kernel with nothing to report
pub const VECTOR_ADD: &str = r#"
import uk.ac.manchester.tornado.api.annotations.Parallel;

public class VectorAdd {
    public static void add(float[] a, float[] b, float[] c) {
        for (@Parallel int i = 0; i < c.length; i++) {
            c[i] = a[i] + b[i];
        }
    }
}
"#;

/// Kernel whose inlined helper throws
pub const THROWING_HELPER: &str = r#"
import uk.ac.manchester.tornado.api.annotations.Parallel;

public class Helpers {
    public static void kernel(float[] a) {
        for (@Parallel int i = 0; i < a.length; i++) {
            a[i] = check(a[i]);
        }
    }

    static float check(float x) {
        if (x < 0) {
            throw new IllegalArgumentException("negative");
        }
        return x;
    }
}
"#;

/// Context kernel calling a self-recursive helper
pub const RECURSIVE_HELPER: &str = r#"
import uk.ac.manchester.tornado.api.KernelContext;

public class Recursive {
    public static void kernel(KernelContext context, int[] data) {
        data[0] = fib(data[1]);
    }

    static int fib(int n) {
        return n < 2 ? n : fib(n - 1) + fib(n - 2);
    }
}
"#;

/// Kernel reaching reflection through an imported class
pub const REFLECTION_CALL: &str = r#"
import java.lang.reflect.Array;
import uk.ac.manchester.tornado.api.KernelContext;

public class Reflective {
    public static void kernel(KernelContext context, int[] a) {
        a[0] = Array.getLength(a);
    }
}
"#;

/// Two helpers calling each other: kernel -> ping -> pong -> ping
pub const MUTUAL_RECURSION: &str = r#"
import uk.ac.manchester.tornado.api.KernelContext;

public class Mutual {
    public static void kernel(KernelContext context, int[] a) {
        a[0] = ping(a[1]);
    }

    static int ping(int n) {
        return n <= 0 ? 0 : pong(n - 1);
    }

    static int pong(int n) {
        return n <= 0 ? 1 : ping(n - 1);
    }
}
"#;

/// Kernel calling into `java.lang.System` and `java.io`
pub const SYSTEM_CALLS: &str = r#"
import uk.ac.manchester.tornado.api.annotations.Parallel;

public class Calls {
    public static void kernel(float[] a) {
        for (@Parallel int i = 0; i < a.length; i++) {
            long t = System.nanoTime();
            System.out.println(a[i]);
            a[i] = (float) Math.sqrt(a[i]);
        }
    }
}
"#;

/// Kernel with a `throws` clause, a try/catch and an assert
pub const TRAPS: &str = r#"
import uk.ac.manchester.tornado.api.annotations.Parallel;

public class Traps {
    public static void kernel(int[] a) throws Exception {
        assert a.length > 0;
        for (@Parallel int i = 0; i < a.length; i++) {
            try {
                a[i] = a[i] / i;
            } catch (ArithmeticException e) {
                a[i] = 0;
            }
        }
    }
}
"#;

/// Kernel with unsupported parameter and local types
pub const BAD_TYPES: &str = r#"
import uk.ac.manchester.tornado.api.annotations.Parallel;
import uk.ac.manchester.tornado.api.types.arrays.FloatArray;

public class Types {
    public static void kernel(String label, int[][] grid, FloatArray ok) {
        for (@Parallel int i = 0; i < grid.length; i++) {
            Integer boxed = grid[i][0];
            grid[i][0] = boxed + 1;
        }
    }
}
"#;

/// Kernel referencing a static task graph
pub const STATIC_GRAPH: &str = r#"
import uk.ac.manchester.tornado.api.TaskGraph;
import uk.ac.manchester.tornado.api.annotations.Parallel;

public class Graphs {
    static TaskGraph graph = new TaskGraph("s0");

    public static void kernel(float[] a) {
        for (@Parallel int i = 0; i < a.length; i++) {
            a[i] = 1.0f;
        }
        graph.task("t0", a);
    }
}
"#;

/// Context kernels returning a value and calling an unknown method
pub const NON_VOID_AND_UNRESOLVED: &str = r#"
import uk.ac.manchester.tornado.api.KernelContext;

public class Misc {
    public static int sum(KernelContext context, int[] data) {
        return data[context.globalIdx];
    }

    public static void lost(KernelContext context, int[] data) {
        data[0] = missing(1);
    }
}
"#;

/// Library class used through an import
pub const LIBRARY_OPS: &str = r#"
package org.ejml;

public class Ops {
    public static float dot(float[] a, float[] b) {
        float s = 0;
        for (int i = 0; i < a.length; i++) { s += a[i] * b[i]; }
        return s;
    }
}
"#;

/// Kernel calling the library class above
pub const LIBRARY_CALLER: &str = r#"
import org.ejml.Ops;
import uk.ac.manchester.tornado.api.annotations.Parallel;

public class UsesLibrary {
    public static void kernel(float[] a, float[] b, float[] out) {
        for (@Parallel int i = 0; i < out.length; i++) {
            out[i] = Ops.dot(a, b);
        }
    }
}
"#;

/// Local-memory allocations sized from parameters
pub const LOCAL_MEMORY: &str = r#"
import uk.ac.manchester.tornado.api.KernelContext;

public class Reduce {
    public static void reduce(KernelContext context, float[] data, int groupSize, int unused) {
        int size = groupSize * 2;
        float[] local = context.allocateFloatLocalArray(size);
        int[] fixed = context.allocateIntLocalArray(64);
        local[context.localIdx] = data[context.globalIdx];
    }

    public static void direct(KernelContext context, int width, int height) {
        double[] tile = context.allocateDoubleLocalArray((width + 1) * height);
    }
}
"#;

/// Kernel `kernel` calling a chain `h1` .. `h<length>`; the last helper throws
pub fn helper_chain(length: usize) -> String {
    let mut source = String::from(
        "import uk.ac.manchester.tornado.api.annotations.Parallel;\npublic class Chain {\n",
    );
    source.push_str(
        "    public static void kernel(int[] a) {\n        for (@Parallel int i = 0; i < a.length; i++) { a[i] = h1(a[i]); }\n    }\n",
    );
    for n in 1..=length {
        let body = if n < length {
            format!("return h{}(x + 1);", n + 1)
        } else {
            "if (x < 0) { throw new IllegalStateException(); } return x;".to_string()
        };
        source.push_str(&format!("    static int h{}(int x) {{ {} }}\n", n, body));
    }
    source.push_str("}\n");
    source
}

/// `count` context kernels with no findings
pub fn clean_kernels(count: usize) -> String {
    let mut source = String::from(
        "import uk.ac.manchester.tornado.api.KernelContext;\npublic class Many {\n",
    );
    for n in 0..count {
        source.push_str(&format!(
            "    public static void k{}(KernelContext context, float[] a) {{ a[context.globalIdx] = {}.0f; }}\n",
            n, n
        ));
    }
    source.push_str("}\n");
    source
}
