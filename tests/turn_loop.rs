//! Drives the turn driver end-to-end over an in-memory reader/writer for a
//! few scripted turns, checking the output protocol shape rather than exact
//! numeric trajectories (solver output depends on wall-clock budget).

use std::io::Cursor;

use mad_pod_racing::driver::Driver;

fn scripted_input(turns: usize) -> String {
    let mut input = String::new();
    input.push_str("3\n");
    input.push_str("3\n");
    input.push_str("0 0\n");
    input.push_str("8000 0\n");
    input.push_str("8000 8000\n");

    for _ in 0..turns {
        input.push_str("0 0 0 0 0 1\n");
        input.push_str("1000 0 0 0 0 1\n");
        input.push_str("8000 8000 0 0 0 1\n");
        input.push_str("9000 8000 0 0 0 1\n");
    }
    input
}

#[test]
fn driver_emits_two_lines_for_a_single_turn() {
    let input = scripted_input(1);
    let reader = Cursor::new(input.into_bytes());
    let mut output = Vec::new();

    {
        let writer = &mut output;
        let mut driver = Driver::new(reader, writer).expect("driver should parse the track header");
        driver.run().expect("driver should run to clean end-of-input");
    }

    let text = String::from_utf8(output).expect("output must be valid utf-8");
    assert_eq!(text.lines().count(), 2, "one scripted turn emits exactly two move lines");
}

#[test]
fn driver_output_lines_have_four_tokens_each() {
    let input = scripted_input(2);
    let reader = Cursor::new(input.into_bytes());
    let mut output = Vec::new();

    {
        let writer = &mut output;
        let mut driver = Driver::new(reader, writer).expect("track header should parse");
        driver.run().expect("driver should run to clean end-of-input");
    }

    let text = String::from_utf8(output).expect("output must be valid utf-8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4, "two moves per scripted turn, two scripted turns");

    for line in lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        assert_eq!(tokens.len(), 4, "line {line:?} should have target x, y and two power tokens");
        tokens[0].parse::<i64>().expect("target x should be numeric");
        tokens[1].parse::<i64>().expect("target y should be numeric");
    }
}

#[test]
fn driver_stops_cleanly_on_eof_before_a_full_pod_line_set() {
    let mut input = scripted_input(1);
    input.push_str("0 0 0 0 0 1\n");
    let reader = Cursor::new(input.into_bytes());
    let mut output = Vec::new();

    let writer = &mut output;
    let mut driver = Driver::new(reader, writer).expect("track header should parse");
    let result = driver.run();
    assert!(result.is_err(), "a partial pod line set after a clean turn is a malformed channel");
}
