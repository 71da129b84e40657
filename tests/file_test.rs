mod common;
use common::*;
use std::path::Path;

fn quoted(path: &Path) -> String {
    format!("\"{}\"", path.display())
}

#[test]
fn test_sequential_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = quoted(&dir.path().join("OUT.TXT"));
    let source = format!(
        "\
10 OPEN {p} FOR OUTPUT AS #1
20 PRINT #1, \"HELLO\";42
30 WRITE #1, 1.5, \"A\"
40 CLOSE #1
50 OPEN {p} FOR INPUT AS #1
60 LINE INPUT #1, A$
70 INPUT #1, X, B$
80 PRINT A$: PRINT X: PRINT B$
90 PRINT EOF(1)
100 CLOSE
",
        p = path
    );
    assert_eq!(output(&source), "HELLO42\n 1.5\nA\n-1\n");
    let written = std::fs::read_to_string(dir.path().join("OUT.TXT")).unwrap();
    assert_eq!(written, "HELLO42\n1.5,\"A\"\r\n");
}

#[test]
fn test_append() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("LOG.TXT");
    std::fs::write(&file, "ONE\n").unwrap();
    let source = format!(
        "10 OPEN {} FOR APPEND AS #2\n20 PRINT #2, \"TWO\"\n30 CLOSE #2\n",
        quoted(&file)
    );
    assert_eq!(output(&source), "");
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "ONE\nTWO\n");
}

#[test]
fn test_files_closed_at_end() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("LEFT.TXT");
    let source = format!(
        "10 OPEN {} FOR OUTPUT AS #1\n20 PRINT #1, \"OPEN\"\n30 END\n",
        quoted(&file)
    );
    output(&source);
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "OPEN\n");
}

#[test]
fn test_eof_loop() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("IN.TXT");
    std::fs::write(&file, "1\r\n2\r\n3\r\n").unwrap();
    let source = format!(
        "10 OPEN {} FOR INPUT AS #1\n20 WHILE NOT EOF(1)\n30 INPUT #1, N\n40 S=S+N\n50 WEND\n60 PRINT S\n",
        quoted(&file)
    );
    assert_eq!(output(&source), " 6\n");
}

#[test]
fn test_random_records() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("REC.DAT");
    let source = format!(
        "\
10 OPEN {} AS #1 LEN=10
20 FIELD #1, 4 AS N$, 6 AS S$
30 LSET N$=MKS$(2.5)
40 LSET S$=\"AB\"
50 PUT #1, 1
60 LSET N$=MKS$(-1)
70 RSET S$=\"CD\"
80 PUT #1, 2
90 GET #1, 1
100 PRINT CVS(N$);\"[\";S$;\"]\"
110 GET #1, 2
120 PRINT CVS(N$);\"[\";S$;\"]\"
130 CLOSE #1
",
        quoted(&file)
    );
    assert_eq!(output(&source), " 2.5[AB    ]\n-1[    CD]\n");
    let bytes = std::fs::read(&file).unwrap();
    assert_eq!(bytes.len(), 20);
    assert_eq!(&bytes[0..4], &[0x00, 0x00, 0x20, 0x82]);
}

#[test]
fn test_field_wider_than_record() {
    let dir = tempfile::tempdir().unwrap();
    let file = quoted(&dir.path().join("WIDE.DAT"));
    for width in &["8 AS A$, 4 AS B$", "1E9 AS A$", "40000 AS A$"] {
        let source = format!("10 OPEN {} AS #1 LEN=10\n20 FIELD #1, {}\n", file, width);
        let r = run(&source);
        assert_eq!(r.errors, vec!["FIELD OVERFLOW IN 20.0 AT SOURCE LINE 2"], "{}", width);
    }
}

#[test]
fn test_close_unopened_warns() {
    let r = run("10 CLOSE #3\n20 PRINT \"ON\"\n");
    assert_eq!(r.output, "ON\n");
    assert_eq!(r.errors, vec!["WARNING IN 10.0 AT SOURCE LINE 1; FILE #3 NOT OPEN"]);
    assert!(!r.runtime.is_failed());
}

#[test]
fn test_bad_file_number() {
    let r = run("10 PRINT #2, 1\n");
    assert_eq!(r.errors, vec!["BAD FILE NUMBER IN 10.0 AT SOURCE LINE 1"]);
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = format!(
        "10 OPEN {} FOR INPUT AS #1\n",
        quoted(&dir.path().join("NONE.TXT"))
    );
    let r = run(&source);
    assert_eq!(r.errors.len(), 1);
    assert!(r.errors[0].starts_with("FILE NOT FOUND IN 10.0"), "{:?}", r.errors);
}

#[test]
fn test_screen_device() {
    assert_eq!(
        output("10 OPEN \"SCRN:\" FOR OUTPUT AS #1\n20 PRINT #1, \"SHOWN\"\n30 CLOSE #1\n"),
        "SHOWN\n"
    );
}
