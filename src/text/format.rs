/// Renders strings as a bracketed, single-quoted list: `['a', 'b']`.
///
/// Used for the CLI debug line and the models file, which share this layout.
pub fn quoted_list<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| format!("'{}'", s.as_ref())).collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_each_item() {
        assert_eq!(quoted_list(&["what", "is", "22"]), "['what', 'is', '22']");
    }

    #[test]
    fn empty_list() {
        assert_eq!(quoted_list::<String>(&[]), "[]");
    }
}
