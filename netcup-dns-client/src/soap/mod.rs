//! Minimal SOAP 1.1 RPC codec and the default HTTP transport.
//!
//! Encodes an ordered, named argument list and decodes the return value
//! tree. There is no WSDL introspection and no schema validation.

mod decode;
mod envelope;
mod transport;

pub use decode::decode_response;
pub use envelope::encode_request;
pub use transport::HttpSoapTransport;
