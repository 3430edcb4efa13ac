//! Small utility helpers used across modules.

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge error bodies; cuts on a char boundary.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  match s.char_indices().nth(max) {
    None => s.to_string(),
    Some((cut, _)) => format!("{}… ({} bytes total)", &s[..cut], s.len()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn short_strings_pass_through() {
    assert_eq!(trunc_for_log("bad gateway", 300), "bad gateway");
  }

  #[test]
  fn long_strings_are_cut_on_char_boundaries() {
    let s = "题".repeat(10);
    assert_eq!(trunc_for_log(&s, 3), "题题题… (30 bytes total)");
  }
}
