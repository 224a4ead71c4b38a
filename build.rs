fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Backend stubs: clients for the gateway, servers for the in-process
    // mock backends used by the transport tests.
    tonic_build::configure()
        .build_client(true)
        .build_server(true)
        .compile_protos(
            &[
                "proto/user_service.proto",
                "proto/order_service.proto",
                "proto/product_service.proto",
            ],
            &["proto"],
        )?;

    Ok(())
}
