#![no_main]
use libfuzzer_sys::fuzz_target;

use avl_arena::model::{run_avl_equivalence, Op};

fuzz_target!(|ops: Vec<Op>| { run_avl_equivalence(ops) });
