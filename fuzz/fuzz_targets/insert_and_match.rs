#![no_main]
use libfuzzer_sys::fuzz_target;
use radix_router::{Method, Node};

fuzz_target!(|data: (Vec<(String, i32)>, String)| {
    let mut tree = Node::new();

    for (pattern, item) in data.0 {
        if tree.insert(Method::Get, &pattern, item).is_err() {
            return;
        }
    }

    let _ = tree.at(Method::Get, &data.1);
    let _ = tree.allowed(&data.1);
});
