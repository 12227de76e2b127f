fn main() -> Result<(), Box<dyn std::error::Error>> {
    qanat::cli::main()
}
