//! SOAP 1.1 RPC 请求编码

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde_json::Value;

use crate::error::TransportFault;
use crate::traits::SoapParam;

pub(crate) const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub(crate) const SOAP_ENC_NS: &str = "http://schemas.xmlsoap.org/soap/encoding/";
pub(crate) const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema";
pub(crate) const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Element name used for array members.
pub(crate) const ARRAY_ITEM: &str = "item";

type XmlWriter = Writer<Vec<u8>>;

fn encoding_error(e: impl std::fmt::Display) -> TransportFault {
    TransportFault::Encoding {
        detail: e.to_string(),
    }
}

fn write(writer: &mut XmlWriter, event: Event<'_>) -> Result<(), TransportFault> {
    writer.write_event(event).map_err(encoding_error)
}

/// Build the request envelope for `method` with `params` in order.
///
/// The operation element is `ns1:<method>` in `namespace`; each argument
/// becomes an unqualified child element named after the parameter.
pub fn encode_request(
    namespace: &str,
    method: &str,
    params: &[SoapParam],
) -> Result<String, TransportFault> {
    let mut writer = Writer::new(Vec::new());

    write(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;

    let mut envelope = BytesStart::new("SOAP-ENV:Envelope");
    envelope.push_attribute(("xmlns:SOAP-ENV", SOAP_ENV_NS));
    envelope.push_attribute(("xmlns:ns1", namespace));
    envelope.push_attribute(("xmlns:xsd", XSD_NS));
    envelope.push_attribute(("xmlns:xsi", XSI_NS));
    envelope.push_attribute(("xmlns:SOAP-ENC", SOAP_ENC_NS));
    envelope.push_attribute(("SOAP-ENV:encodingStyle", SOAP_ENC_NS));
    write(&mut writer, Event::Start(envelope))?;
    write(&mut writer, Event::Start(BytesStart::new("SOAP-ENV:Body")))?;

    let operation = format!("ns1:{method}");
    let start = BytesStart::new(operation.as_str());
    write(&mut writer, Event::Start(start))?;
    for param in params {
        write_value(&mut writer, &param.name, &param.value)?;
    }
    write(&mut writer, Event::End(BytesEnd::new(operation.as_str())))?;

    write(&mut writer, Event::End(BytesEnd::new("SOAP-ENV:Body")))?;
    write(&mut writer, Event::End(BytesEnd::new("SOAP-ENV:Envelope")))?;

    String::from_utf8(writer.into_inner()).map_err(encoding_error)
}

fn write_value(writer: &mut XmlWriter, name: &str, value: &Value) -> Result<(), TransportFault> {
    match value {
        Value::Null => {
            let mut element = BytesStart::new(name);
            element.push_attribute(("xsi:nil", "true"));
            write(writer, Event::Empty(element))
        }
        Value::Object(fields) => {
            write(writer, Event::Start(BytesStart::new(name)))?;
            for (field, inner) in fields {
                write_value(writer, field, inner)?;
            }
            write(writer, Event::End(BytesEnd::new(name)))
        }
        Value::Array(items) => {
            let mut element = BytesStart::new(name);
            element.push_attribute(("xsi:type", "SOAP-ENC:Array"));
            write(writer, Event::Start(element))?;
            for item in items {
                write_value(writer, ARRAY_ITEM, item)?;
            }
            write(writer, Event::End(BytesEnd::new(name)))
        }
        Value::Bool(b) => write_text(writer, name, if *b { "true" } else { "false" }),
        Value::Number(n) => write_text(writer, name, &n.to_string()),
        Value::String(s) => write_text(writer, name, s),
    }
}

fn write_text(writer: &mut XmlWriter, name: &str, text: &str) -> Result<(), TransportFault> {
    write(writer, Event::Start(BytesStart::new(name)))?;
    if !text.is_empty() {
        write(writer, Event::Text(BytesText::new(text)))?;
    }
    write(writer, Event::End(BytesEnd::new(name)))
}
