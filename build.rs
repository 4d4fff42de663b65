//! Compiles the collection manager protobuf definitions.
//!
//! The client stubs are used by the CLI. The server stubs are only exercised by
//! the integration tests, which run an in-process fake of the manager.

const PROTOS: &[&str] = &["proto/manager.proto"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // use the bundled protoc so the build does not depend on a system install
    let protoc = protoc_bin_vendored::protoc_bin_path()?;
    // SAFETY: build scripts are single threaded
    unsafe { std::env::set_var("PROTOC", protoc) };
    let well_known = protoc_bin_vendored::include_path()?;

    for proto in PROTOS {
        println!("cargo:rerun-if-changed={}", proto);
    }

    tonic_build::configure()
        .build_client(true)
        .build_server(true)
        .compile_protos(PROTOS, &[std::path::PathBuf::from("proto"), well_known])?;

    Ok(())
}
