mod common;
use common::*;

#[test]
fn test_resume_retries_failing_statement() {
    let source = "\
10 ON ERROR GOTO 500
20 ERRCOUNT=0
30 NEXT X ' next without for, an error
40 END
500 ERRCOUNT = ERRCOUNT + 1
505 PRINT ERRCOUNT
    ' These are equivalent and re-execute the offending statement
510 IF ERRCOUNT < 2 THEN RESUME
520 IF ERRCOUNT < 4 THEN RESUME 0
530 RESUME NEXT
";
    let r = run(source);
    assert_eq!(r.output, " 1\n 2\n 3\n 4\n");
    assert_eq!(r.errors.len(), 4);
    assert!(r
        .errors
        .iter()
        .all(|e| e == "NEXT WITHOUT FOR IN 30.0 AT SOURCE LINE 3"));
    assert!(!r.runtime.is_failed());
}

#[test]
fn test_err_and_erl() {
    let source = "\
10 ON ERROR GOTO 100
20 X=1/0
30 PRINT \"AFTER\"
40 END
100 PRINT ERR;ERL
110 RESUME NEXT
";
    let r = run(source);
    assert_eq!(r.output, "11 20\nAFTER\n");
    assert_eq!(r.errors, vec!["DIVISION BY ZERO IN 20.0 AT SOURCE LINE 2"]);
}

#[test]
fn test_resume_line() {
    let source = "\
10 ON ERROR GOTO 100
20 ERROR 62
30 PRINT \"SKIPPED\"
40 PRINT \"DONE\"
50 END
100 PRINT ERR
110 RESUME 40
";
    let r = run(source);
    assert_eq!(r.output, "62\nDONE\n");
    assert_eq!(r.errors, vec!["INPUT PAST END IN 20.0 AT SOURCE LINE 2"]);
}

#[test]
fn test_unknown_error_code() {
    let r = run("10 ERROR 200\n");
    assert_eq!(r.errors, vec!["PROGRAM ERROR 200 IN 10.0 AT SOURCE LINE 1"]);
    assert!(r.runtime.is_failed());
}

#[test]
fn test_resume_without_error() {
    let r = run("10 RESUME NEXT\n");
    assert_eq!(r.errors, vec!["RESUME WITHOUT ERROR IN 10.0 AT SOURCE LINE 1"]);
}

#[test]
fn test_error_inside_handler_is_fatal() {
    let r = run("10 ON ERROR GOTO 100\n20 X=1/0\n30 END\n100 Y=1/0\n110 RESUME NEXT\n");
    assert_eq!(
        r.errors,
        vec![
            "DIVISION BY ZERO IN 20.0 AT SOURCE LINE 2",
            "DIVISION BY ZERO IN 100.0 AT SOURCE LINE 4",
        ]
    );
    assert!(r.runtime.is_failed());
}

#[test]
fn test_handler_cleared() {
    let r = run("10 ON ERROR GOTO 100\n20 ON ERROR GOTO 0\n30 X=1/0\n40 END\n100 RESUME NEXT\n");
    assert_eq!(r.errors, vec!["DIVISION BY ZERO IN 30.0 AT SOURCE LINE 3"]);
    assert!(r.runtime.is_failed());
}

#[test]
fn test_undefined_line() {
    let r = run("10 PRINT 1\n20 GOTO 99\n");
    assert_eq!(r.output, "1\n");
    assert_eq!(
        r.errors,
        vec![
            "WARNING IN 20.0 AT SOURCE LINE 2; UNDEFINED LINE 99",
            "UNDEFINED LINE IN 20.0 AT SOURCE LINE 2; LINE 99",
        ]
    );
}

#[test]
fn test_uncompiled_line() {
    let r = run("10 PRINT 1\n20 FOR\n30 PRINT 2\n");
    assert_eq!(r.output, "1\n");
    assert_eq!(r.errors.len(), 2);
    assert!(r.errors[0].starts_with("SYNTAX ERROR IN 20.0 AT SOURCE LINE 2"));
    assert_eq!(
        r.errors[1],
        "SYNTAX ERROR IN 20.0 AT SOURCE LINE 2; UNCOMPILED LINE"
    );
    assert!(r.runtime.is_failed());
}

#[test]
fn test_uncompiled_line_not_reached() {
    let r = run("10 GOTO 30\n20 FOR\n30 PRINT 2\n");
    assert_eq!(r.output, "2\n");
    assert_eq!(r.errors.len(), 1);
    assert!(!r.runtime.is_failed());
}

#[test]
fn test_type_mismatch() {
    let r = run("10 A$=1\n");
    assert_eq!(r.errors, vec!["TYPE MISMATCH IN 10.0 AT SOURCE LINE 1"]);
}

#[test]
fn test_output_kept_on_failure() {
    let r = run("10 PRINT \"BEFORE\"\n20 PRINT 1/0\n30 PRINT \"AFTER\"\n");
    assert_eq!(r.output, "BEFORE\n");
    assert!(r.runtime.is_failed());
}

#[test]
fn test_restore_to_line_unsupported() {
    let r = run("10 DATA 1\n20 RESTORE 10\n");
    assert_eq!(r.errors.len(), 1);
    assert!(r.errors[0].starts_with("ADVANCED FEATURE IN 20.0"));
}

#[test]
fn test_wend_without_while() {
    let r = run("10 WEND\n");
    assert_eq!(r.errors, vec!["WEND WITHOUT WHILE IN 10.0 AT SOURCE LINE 1"]);
}
