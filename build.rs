fn main() -> Result<(), Box<dyn std::error::Error>> {
    tonic_build::configure()
        // Server stubs are only used by the integration tests (mock node).
        .build_server(true)
        .compile_protos(&["proto/chainapi.proto"], &["proto/"])?;
    Ok(())
}
