//! Canonical formatting of parsed programs.

use promptscript::format::format_program;
use promptscript::parse;

fn reformat(source: &str) -> String {
    format_program(&parse(source).expect("source should parse"))
}

#[test]
fn test_format_greeter() {
    let formatted = reformat(include_str!("fixtures/valid/greeter.ps"));
    assert_eq!(formatted, include_str!("fixtures/valid/greeter.ps"));
}

#[test]
fn test_format_normalizes_layout() {
    let source = "blueprint B{goal:\"g\" version:\"1\"}
prompt P{define D:   text here
task T: output: \"o\" instruction: \"i\"}
workflow W{step s->m.f(a,b)}";

    let expected = "blueprint B {
  version: \"1\"
  goal: \"g\"
}

prompt P {
  define D: text here
  task T:
    instruction: \"i\"
    output: \"o\"
}

workflow W {
  step s -> m.f(a, b)
}
";
    assert_eq!(reformat(source), expected);
}

#[test]
fn test_formatted_output_reparses_to_same_program() {
    for source in [
        include_str!("fixtures/valid/greeter.ps"),
        include_str!("fixtures/valid/pipeline.promptscript"),
    ] {
        let program = parse(source).unwrap();
        let reparsed = parse(&format_program(&program)).unwrap();
        assert_eq!(program, reparsed);
    }
}

#[test]
fn test_formatting_is_idempotent() {
    let once = reformat(include_str!("fixtures/valid/pipeline.promptscript"));
    assert_eq!(reformat(&once), once);
}

#[test]
fn test_unicode_space_define_body_round_trips() {
    let program = parse("blueprint B {}\nprompt P {\n  define A: \u{a0}\n}\n").unwrap();
    let definition = &program.prompts[0].defines().next().unwrap().definition;
    assert_eq!(definition, "\u{a0}");

    let reparsed = parse(&format_program(&program)).unwrap();
    assert_eq!(program, reparsed);
}
