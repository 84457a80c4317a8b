use super::*;

#[test]
fn stdin_input_is_trimmed() {
    let text = read_input_from(None, &b"  What is osmosis?\n"[..]).unwrap();
    assert_eq!(text, "What is osmosis?");
}

#[test]
fn dash_reads_stdin() {
    let text = read_input_from(Some("-".into()), &b"fn main() {}\n\n"[..]).unwrap();
    assert_eq!(text, "fn main() {}");
}

#[test]
fn argument_input_is_trimmed_and_ignores_stdin() {
    let text = read_input_from(Some(" Photosynthesis \n".into()), &b"unused"[..]).unwrap();
    assert_eq!(text, "Photosynthesis");
}

#[test]
fn trimmed_input_lands_verbatim_in_prompt() {
    let question = read_input_from(None, &b"Define osmosis.\n"[..]).unwrap();
    let prompt = HomeworkTask { question }.prompt();
    assert!(prompt.ends_with("Input: \"Define osmosis.\""));
}

#[test]
fn option_answers() {
    assert_eq!(parse_option("b\n"), Some(1));
    assert_eq!(parse_option(" 4 "), Some(3));
    assert_eq!(parse_option("e"), None);
    assert_eq!(parse_option("0"), None);
}
