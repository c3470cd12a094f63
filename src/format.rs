// SPDX-License-Identifier: MIT OR Apache-2.0

/**
Formats a log line as `[tag]: message`.

An absent message is treated as empty.

```rust
assert_eq!(calltag::format_line("TAG", Some("hello")), "[TAG]: hello");
assert_eq!(calltag::format_line("TAG", None), "[TAG]: ");
```
*/
pub fn format_line(tag: &str, message: Option<&str>) -> String {
    format!("[{}]: {}", tag, message.unwrap_or_default())
}
