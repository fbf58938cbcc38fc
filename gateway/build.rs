fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = std::path::PathBuf::from(std::env::var("OUT_DIR")?);

    // 编译 expense.proto（仅客户端）
    tonic_build::configure()
        .build_server(false)
        .build_client(true)
        .out_dir(&out_dir)
        .compile_protos(&["../proto/expense/v1/expense.proto"], &["../proto"])?;

    println!("cargo:rerun-if-changed=../proto/expense/v1/expense.proto");

    Ok(())
}
