/// Adapters layer - Infrastructure implementations
///
/// Concrete implementations of the ports: file system, ClearlyDefined,
/// external programs and console output.
pub mod outbound;
