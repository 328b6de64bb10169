#![no_main]
use libfuzzer_sys::fuzz_target;

use avl_arena::model::{run_bst_equivalence, Op};

fuzz_target!(|ops: Vec<Op>| { run_bst_equivalence(ops) });
