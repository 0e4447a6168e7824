use digilogic::engine::{Command, Engine};
use digilogic::gate::GateKind;
use digilogic::settings::Settings;
use digilogic::workbench::Workbench;
use digilogic::DigilogicError;

fn run(script: &str) -> digilogic::Result<digilogic::engine::CollectedResult> {
    let workbench = Workbench::default();
    Engine::new(&workbench).execute_collect(script)
}

#[test]
fn convert_command() {
    let res = run("convert 42 from 10;").expect("query ok");
    assert_eq!(res.columns, vec!["binary", "decimal", "octal", "hexadecimal"]);
    assert_eq!(res.row_count, 1);
    assert_eq!(res.value("binary"), Some("101010"));
    let res = run("CONVERT 2a FROM hex").expect("query ok");
    assert_eq!(res.value("decimal"), Some("42"));
}

#[test]
fn code_commands() {
    assert_eq!(run("gray 1010").expect("query ok").value("code"), Some("1111"));
    assert_eq!(run("ungray 1111").expect("query ok").value("binary"), Some("1010"));
    assert_eq!(run("bcd 1010").expect("query ok").value("code"), Some("00010000"));
    assert_eq!(run("excess3 1010").expect("query ok").value("code"), Some("01000011"));
}

#[test]
fn nibble_grouping_setting() {
    let workbench = Workbench::new(Settings { group_nibbles: true, ..Settings::default() });
    let engine = Engine::new(&workbench);
    assert_eq!(engine.execute_collect("bcd 1010").expect("query ok").value("code"), Some("0001 0000"));
    assert_eq!(engine.execute_collect("excess3 1010").expect("query ok").value("code"), Some("0100 0011"));
    // gray keeps the width of its input
    assert_eq!(engine.execute_collect("gray 10110").expect("query ok").value("code"), Some("11101"));
}

#[test]
fn complement_and_simplify_commands() {
    let res = run("complement 1010").expect("query ok");
    assert_eq!(res.value("ones"), Some("0101"));
    assert_eq!(res.value("twos"), Some("0110"));
    let res = run("simplify (A + B)'").expect("query ok");
    assert_eq!(res.value("simplified"), Some("A'*B'"));
    assert_eq!(res.value("rules"), Some("De Morgan (OR)"));
    let res = run("simplify X + Y").expect("query ok");
    assert_eq!(res.value("rules"), Some(""));
}

#[test]
fn gate_commands() {
    assert_eq!(run("gate xor 1 0").expect("query ok").value("output"), Some("1"));
    assert_eq!(run("gate NAND high high").expect("query ok").value("output"), Some("0"));
    assert_eq!(run("gate not 1").expect("query ok").value("output"), Some("0"));
    assert!(matches!(run("gate and 1"), Err(DigilogicError::Parse { .. })));
    assert!(matches!(run("gate and 1 2"), Err(DigilogicError::Parse { .. })));
    assert!(matches!(run("gate buffer 1 1"), Err(DigilogicError::Parse { .. })));
}

#[test]
fn truth_table_command() {
    let res = run("truth table").expect("query ok");
    assert_eq!(res.columns.len(), 9);
    assert_eq!(res.row_count, 4);
    assert_eq!(res.rows[3], vec!["1", "1", "1", "1", "0", "0", "0", "0", "1"]);
}

#[test]
fn flip_flop_session() {
    let workbench = Workbench::default();
    let engine = Engine::new(&workbench);
    let res = engine.execute_collect("flipflop jk; clock 1 1").expect("query ok");
    assert_eq!(res.value("kind"), Some("JK"));
    assert_eq!(res.value("current"), Some("0"));
    assert_eq!(res.value("next"), Some("1"));
    // state carries over to the next script
    let res = engine.execute_collect("clock 1 1").expect("query ok");
    assert_eq!(res.value("current"), Some("1"));
    assert_eq!(res.value("next"), Some("0"));

    let res = engine.execute_collect("flipflop d; clock 1; state").expect("query ok");
    assert_eq!(res.rows, vec![vec!["D", "1"]]);
    assert_eq!(engine.execute_collect("reset").expect("query ok").value("state"), Some("0"));
    assert!(matches!(engine.execute_collect("clock 1 1"), Err(DigilogicError::Parse { .. })));
}

#[test]
fn characteristic_command() {
    let res = run("characteristic t").expect("query ok");
    assert_eq!(res.columns, vec!["inputs", "current", "next"]);
    assert_eq!(res.row_count, 4);
    assert_eq!(res.rows[3], vec!["T=1", "1", "0"]);
    assert_eq!(run("characteristic JK").expect("query ok").row_count, 8);
}

#[test]
fn command_parsing() {
    assert_eq!(
        "GATE NAND 0 1".parse::<Command>(),
        Ok(Command::Gate { kind: GateKind::Nand, a: false, b: Some(true) })
    );
    assert_eq!("state".parse::<Command>(), Ok(Command::State));
    assert_eq!("clock".parse::<Command>(), Ok(Command::Clock { inputs: vec![] }));
}

#[test]
fn errors_stop_the_script() {
    let err = run("launch rockets").unwrap_err();
    assert!(format!("{err}").contains("Unrecognized command"));
    assert_eq!(run(""), Err(DigilogicError::EmptyInput));
    assert_eq!(run(" ; ;"), Err(DigilogicError::EmptyInput));
    assert_eq!(run("simplify"), Err(DigilogicError::EmptyInput));
    assert!(matches!(run("convert 2 from 2"), Err(DigilogicError::InvalidDigit { digit: '2', .. })));
    assert!(matches!(run("convert 12 from 3"), Err(DigilogicError::Parse { .. })));
    assert!(matches!(run("gray 1010; bcd 12; gray 1"), Err(DigilogicError::InvalidDigit { .. })));
}

#[test]
fn overlong_commands_are_rejected() {
    let workbench = Workbench::new(Settings { max_input_length: 10, ..Settings::default() });
    let engine = Engine::new(&workbench);
    let err = engine.execute_collect("simplify A+B+C+D+E+F").unwrap_err();
    assert!(matches!(err, DigilogicError::Parse { .. }));
    assert!(format!("{err}").contains("longer than 10"));
    assert!(engine.execute_collect("gray 1010").is_ok());
}

#[test]
fn input_limit_counts_characters() {
    let workbench = Workbench::new(Settings { max_input_length: 12, ..Settings::default() });
    let engine = Engine::new(&workbench);
    // 12 characters, 15 bytes
    let res = engine.execute_collect("simplify ÄÖÜ").expect("within the limit");
    assert_eq!(res.value("simplified"), Some("ÄÖÜ"));
    assert!(engine.execute_collect("simplify ÄÖÜÄ").is_err());
}
