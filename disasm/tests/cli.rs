use std::{
    path::PathBuf,
    process::{Command, Output},
};

const ADD: &str = "00000001001010100100000000100000";
const J: &str = "00001000000000000000000000000100";

fn write_input(name: &str, body: &str) -> PathBuf {
    let file = format!("mipsdis-cli-{}-{}.txt", name, std::process::id());
    let path = std::env::temp_dir().join(file);
    std::fs::write(&path, body).unwrap();
    path
}

fn mipsdis(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mipsdis"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_listing() {
    let path = write_input("ok", &format!("{ADD}\n{J}\n"));
    let out = mipsdis(&[path.to_str().unwrap()]);
    std::fs::remove_file(&path).unwrap();

    assert!(out.status.success());
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        format!("{ADD}\tadd\t$8, $9, $10\n{J}\tj\t0x10\n")
    );
}

#[test]
fn test_reg_names_flag() {
    let path = write_input("names", &format!("{ADD}\n"));
    let out = mipsdis(&["-n", path.to_str().unwrap()]);
    std::fs::remove_file(&path).unwrap();

    assert!(out.status.success());
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        format!("{ADD}\tadd\t$t0, $t1, $t2\n")
    );
}

#[test]
fn test_bad_input_fails() {
    let path = write_input("bad", &format!("{ADD}\n0101\n"));
    let out = mipsdis(&[path.to_str().unwrap()]);
    std::fs::remove_file(&path).unwrap();

    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Format of input file is incorrect"));
    assert!(stderr.contains(":2"));
}

#[test]
fn test_missing_file_fails() {
    let out = mipsdis(&["/nonexistent/mipsdis/input.txt"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_usage() {
    assert_eq!(mipsdis(&[]).status.code(), Some(1));
    assert_eq!(mipsdis(&["--help"]).status.code(), Some(0));
}
