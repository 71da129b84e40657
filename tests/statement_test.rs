mod common;
use common::*;

#[test]
fn test_print_leading_semicolon() {
    assert_eq!(output("10 PRINT ;1;2\n"), "12\n");
}

#[test]
fn test_print_hex() {
    assert_eq!(output("10 PRINT &HFF\n20 PRINT &h42\n"), "255\n66\n");
}

#[test]
fn test_print_comma_tabs() {
    assert_eq!(output("10 PRINT 1,2\n"), format!("1{}2\n", " ".repeat(13)));
    assert_eq!(
        output("10 PRINT \"A\",\n20 PRINT \"B\"\n"),
        format!("A{}B\n", " ".repeat(13))
    );
}

#[test]
fn test_print_custom_tabs() {
    let config = mbasic::mach::Config {
        tabs: vec![4, 10],
        ..Default::default()
    };
    let (runtime, shared) = runtime("10 PRINT 1,2,3,4\n", None, config);
    let r = finish(runtime, shared);
    assert_eq!(r.output, "1   2     34\n");
}

#[test]
fn test_print_tab() {
    assert_eq!(output("10 PRINT \"A\";TAB(5);\"B\"\n"), "A   B\n");
    assert_eq!(output("10 PRINT \"ABCDEF\";TAB(3);\"B\"\n"), "ABCDEFB\n");
}

#[test]
fn test_print_using() {
    assert_eq!(output("10 PRINT USING \"###.##\";3.14159\n"), "  3.14\n");
    assert_eq!(
        output("10 PRINT USING \"## ##\";1;2\n"),
        " 1  2\n"
    );
}

#[test]
fn test_arithmetic() {
    assert_eq!(output("10 PRINT 7\\2\n20 PRINT 7 MOD 3\n30 PRINT -7 MOD 3\n"), "3\n1\n-1\n");
    assert_eq!(output("10 PRINT 2^10\n20 PRINT 1/4\n30 PRINT 2+3*4\n"), " 1024\n .25\n14\n");
    assert_eq!(output("10 PRINT -2^2\n"), "-4\n");
}

#[test]
fn test_integer_overflow_promotes() {
    assert_eq!(output("10 A%=32767\n20 PRINT A%+1\n"), " 32768\n");
}

#[test]
fn test_integer_variable_rounds() {
    assert_eq!(output("10 A%=2.5\n20 B%=-2.5\n30 PRINT A%;B%\n"), "3-3\n");
    assert!(run("10 A%=40000\n").errors[0].starts_with("OVERFLOW"));
}

#[test]
fn test_relational_and_logic() {
    assert_eq!(output("10 PRINT 1<2;1>2\n"), "-10\n");
    assert_eq!(output("10 PRINT 0 OR 7\n20 PRINT NOT 0\n"), "7\n-1\n");
    assert_eq!(output("10 IF \"A\"<\"B\" THEN PRINT \"LESS\"\n"), "LESS\n");
}

#[test]
fn test_short_circuit() {
    assert_eq!(output("10 A=0\n20 IF A<>0 AND 1/A>1 THEN PRINT \"X\"\n30 PRINT \"OK\"\n"), "OK\n");
}

#[test]
fn test_string_functions() {
    assert_eq!(
        output("10 A$=\"HELLO\"\n20 PRINT LEFT$(A$,2);RIGHT$(A$,3);MID$(A$,2,3);MID$(A$,4)\n"),
        "HELLOELLLO\n"
    );
    assert_eq!(output("10 PRINT LEN(\"ABC\");ASC(\"A\");CHR$(66)\n"), "365B\n");
    assert_eq!(output("10 PRINT STR$(5);STR$(1.5);VAL(\" 12 \")+1\n"), "5 1.5 13\n");
    assert_eq!(output("10 PRINT \"[\";SPACE$(2);STRING$(3,\"*\");\"]\"\n"), "[  ***]\n");
}

#[test]
fn test_numeric_functions() {
    assert_eq!(output("10 PRINT INT(-2.5)\n20 PRINT FIX(-2.5)\n30 PRINT ABS(-3)\n"), "-3\n-2\n3\n");
    assert_eq!(output("10 PRINT SQR(16)\n20 PRINT SGN(-4)\n"), " 4\n-1\n");
}

#[test]
fn test_read_data_restore() {
    let source = "\
10 READ A,B$,C
20 PRINT A;B$;C
30 RESTORE
40 READ D
50 PRINT D
60 DATA 1.5,\"X Y\"
70 DATA -2
";
    assert_eq!(output(source), " 1.5X Y-2\n 1.5\n");
}

#[test]
fn test_out_of_data() {
    let r = run("10 READ A,B\n20 DATA 1\n");
    assert_eq!(r.errors, vec!["OUT OF DATA IN 10.0 AT SOURCE LINE 1"]);
}

#[test]
fn test_arrays() {
    assert_eq!(output("10 DIM A(3)\n20 A(3)=5\n30 PRINT A(3);A(0)\n"), " 5 0\n");
    assert_eq!(output("10 B(10)=1\n20 PRINT B(10)\n"), " 1\n");
    assert_eq!(output("10 DIM M$(2,2)\n20 M$(1,2)=\"X\"\n30 PRINT M$(1,2)\n"), "X\n");
}

#[test]
fn test_array_errors() {
    let r = run("10 B(11)=1\n");
    assert_eq!(r.errors, vec!["SUBSCRIPT OUT OF RANGE IN 10.0 AT SOURCE LINE 1"]);
    let r = run("10 DIM A(3)\n20 DIM A(4)\n");
    assert_eq!(r.errors, vec!["REDIMENSIONED ARRAY IN 20.0 AT SOURCE LINE 2"]);
    let r = run("10 DIM A(65535,65535,65535,65535)\n");
    assert_eq!(r.errors, vec!["OUT OF MEMORY IN 10.0 AT SOURCE LINE 1"]);
}

#[test]
fn test_scalar_and_array_share_name() {
    assert_eq!(output("10 A=1\n20 A(1)=2\n30 PRINT A;A(1)\n"), " 1 2\n");
}

#[test]
fn test_defint() {
    assert_eq!(output("10 DEFINT I-N\n20 I=2.6\n30 PRINT I\n"), "3\n");
}

#[test]
fn test_lset_rset() {
    assert_eq!(
        output("10 A$=\"12345\"\n20 LSET A$=\"AB\"\n30 PRINT \"[\";A$;\"]\"\n40 RSET A$=\"XY\"\n50 PRINT \"[\";A$;\"]\"\n"),
        "[AB   ]\n[   XY]\n"
    );
}

#[test]
fn test_mid_statement() {
    assert_eq!(
        output("10 A$=\"HELLO\"\n20 MID$(A$,2)=\"ipp\"\n30 PRINT A$\n40 MID$(A$,2,1)=\"XYZ\"\n50 PRINT A$\n"),
        "HippO\nHXppO\n"
    );
}

#[test]
fn test_write() {
    assert_eq!(output("10 WRITE 1,\"A\",-2.5,0.5\n"), "1,\"A\",-2.5,.5\n");
}

#[test]
fn test_input() {
    let r = run_with_input("10 INPUT \"N\";N\n20 PRINT N*2\n", "21\n");
    assert_eq!(r.output, "N? 21\n 42\n");
    let r = run_with_input("10 INPUT A,B$\n20 PRINT A;B$\n", "3, \"X\"\n");
    assert_eq!(r.output, "? 3, \"X\"\n 3X\n");
}

#[test]
fn test_line_input() {
    let r = run_with_input("10 LINE INPUT A$\n20 PRINT \"[\";A$;\"]\"\n", "a, b\n");
    assert_eq!(r.output, "a, b\n[a, b]\n");
}

#[test]
fn test_input_past_end() {
    let r = run_with_input("10 INPUT A\n20 INPUT B\n", "1\n");
    assert_eq!(r.errors, vec!["INPUT PAST END IN 20.0 AT SOURCE LINE 2"]);
}

#[test]
fn test_rnd_repeats_with_zero() {
    let r = run("10 A=RND(1)\n20 B=RND(0)\n30 PRINT A=B\n40 PRINT A>=0 AND A<1\n");
    assert_eq!(r.output, "-1\n-1\n");
}

#[test]
fn test_comment_lines_are_targets() {
    assert_eq!(output("10 GOTO 30\n20 PRINT \"NO\"\n30 REM TARGET\n40 '\n50 PRINT \"YES\"\n"), "YES\n");
}

#[test]
fn test_on_gosub_out_of_range_falls_through() {
    let source = "\
10 ON -1 GOSUB 100
20 ON 0 GOSUB 100
30 ON 2 GOSUB 100
40 PRINT \"FALL\"
50 ON 1.7 GOSUB 100
60 END
100 PRINT \"SUB\"
110 RETURN
";
    assert_eq!(output(source), "FALL\nSUB\n");
}
