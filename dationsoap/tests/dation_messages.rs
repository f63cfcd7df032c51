use dationsoap::schema::{array, field, object, object_schema};
use dationsoap::{
    NamespaceContext, Param, SoapError, Value, build_message, parse_document, parse_response,
};

const WSDL: &str = "https://dation.example/soap/server.php";

const OVERZICHT_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/"
    xmlns:ns1="https://dation.example/soap/server.php"
    xmlns:xsd="http://www.w3.org/2001/XMLSchema"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
    xmlns:SOAP-ENC="http://schemas.xmlsoap.org/soap/encoding/"
    SOAP-ENV:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/">
  <SOAP-ENV:Body>
    <ns1:WS_Cursus_OverzichtResponse>
      <return xsi:type="tns:Cursus_Overzicht_Response">
        <Items SOAP-ENC:arrayType="tns:AgendaItem[2]" xsi:type="SOAP-ENC:Array">
          <item xsi:type="tns:AgendaItem">
            <Id xsi:type="xsd:int">101</Id>
            <ItemType xsi:type="tns:ItemType"><Naam xsi:type="xsd:string">Rijles</Naam></ItemType>
            <Instructeur xsi:type="tns:Instructeur"><Naam xsi:type="xsd:string">Jan</Naam></Instructeur>
            <Start xsi:type="xsd:dateTime">2023-05-01T10:00:00+02:00</Start>
            <Stop xsi:type="xsd:dateTime">2023-05-01T11:00:00+02:00</Stop>
            <Opmerkingen xsi:type="xsd:string"></Opmerkingen>
          </item>
          <item xsi:type="tns:AgendaItem">
            <Id xsi:type="xsd:int">102</Id>
            <ItemType xsi:type="tns:ItemType"><Naam xsi:type="xsd:string">Examen</Naam></ItemType>
            <Instructeur xsi:type="tns:Instructeur"><Naam xsi:type="xsd:string">Piet</Naam></Instructeur>
            <Start xsi:type="xsd:dateTime">2023-05-08T09:30:00+02:00</Start>
            <Stop xsi:type="xsd:dateTime">2023-05-08T10:30:00+02:00</Stop>
            <Opmerkingen xsi:type="xsd:string">CBR &amp; co</Opmerkingen>
          </item>
        </Items>
      </return>
    </ns1:WS_Cursus_OverzichtResponse>
  </SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#;

fn agenda_schema() -> Vec<dationsoap::SchemaNode> {
    vec![array(
        "Items",
        object_schema(
            "item",
            vec![
                field("Id"),
                object("ItemType", vec![field("Naam")]),
                object("Instructeur", vec![field("Naam")]),
                field("Start"),
                field("Stop"),
                field("Opmerkingen"),
            ],
        ),
    )]
}

#[test]
fn overzicht_response_is_extracted_in_order() {
    let ns = NamespaceContext::new(WSDL);
    let document = parse_document(OVERZICHT_RESPONSE.as_bytes()).unwrap();

    let values = parse_response(&ns, &document, "Cursus_Overzicht_Response", &agenda_schema())
        .unwrap();

    let items = values["Items"].as_sequence().unwrap();
    assert_eq!(items.len(), 2);

    assert_eq!(items[0]["Id"], Value::Integer(101));
    assert_eq!(
        items[0]["ItemType"].as_mapping().unwrap()["Naam"].as_text(),
        Some("Rijles")
    );
    assert_eq!(items[0]["Opmerkingen"].as_text(), Some(""));

    assert_eq!(items[1]["Id"], Value::Integer(102));
    assert_eq!(
        items[1]["Instructeur"].as_mapping().unwrap()["Naam"].as_text(),
        Some("Piet")
    );
    assert_eq!(items[1]["Opmerkingen"].as_text(), Some("CBR & co"));

    let start = items[1]["Start"].as_timestamp().unwrap();
    assert_eq!(start.to_rfc3339(), "2023-05-08T09:30:00+02:00");

    let keys: Vec<&str> = items[0].keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["Id", "ItemType", "Instructeur", "Start", "Stop", "Opmerkingen"]
    );
}

#[test]
fn whitespace_only_comment_is_kept() {
    let ns = NamespaceContext::new(WSDL);
    let xml = OVERZICHT_RESPONSE.replace(
        r#"<Opmerkingen xsi:type="xsd:string"></Opmerkingen>"#,
        r#"<Opmerkingen xsi:type="xsd:string">   </Opmerkingen>"#,
    );
    assert_ne!(xml, OVERZICHT_RESPONSE);
    let document = parse_document(xml.as_bytes()).unwrap();

    let values = parse_response(&ns, &document, "Cursus_Overzicht_Response", &agenda_schema())
        .unwrap();

    let items = values["Items"].as_sequence().unwrap();
    assert_eq!(items[0]["Opmerkingen"].as_text(), Some("   "));
    assert_eq!(items[1]["Opmerkingen"].as_text(), Some("CBR & co"));
}

#[test]
fn parsing_is_deterministic() {
    let ns = NamespaceContext::new(WSDL);
    let document = parse_document(OVERZICHT_RESPONSE.as_bytes()).unwrap();

    let first = parse_response(&ns, &document, "Cursus_Overzicht_Response", &agenda_schema());
    let second = parse_response(&ns, &document, "Cursus_Overzicht_Response", &agenda_schema());
    assert_eq!(first.unwrap(), second.unwrap());
}

#[test]
fn wrong_response_type_is_missing_return() {
    let ns = NamespaceContext::new(WSDL);
    let document = parse_document(OVERZICHT_RESPONSE.as_bytes()).unwrap();

    let err = parse_response(&ns, &document, "Rijschool_NAW_Response", &agenda_schema())
        .unwrap_err();
    assert!(matches!(err, SoapError::MissingReturnElement(_)));
}

#[test]
fn built_request_reparses_to_its_values() {
    let ns = NamespaceContext::new(WSDL);
    let params = [
        Param::int("RijschoolId", 42),
        Param::string("Username", "jdoe"),
        Param::string("Password", r#"p<a&s"s"#),
        Param::string("RemoteIp", "android"),
    ];
    let bytes = build_message(
        &ns,
        "WS_Rijschool_Login_Leerling",
        "Rijschool_Login_Leerling_Request",
        &params,
    )
    .unwrap();

    let envelope = parse_document(bytes.as_slice()).unwrap();
    let request = envelope
        .get_child("Body")
        .and_then(|b| b.get_child("WS_Rijschool_Login_Leerling"))
        .and_then(|op| op.get_child("request"))
        .unwrap();

    let pairs: Vec<(String, String)> = request
        .children
        .iter()
        .filter_map(|n| n.as_element())
        .map(|e| (e.name.clone(), e.get_text().unwrap_or_default().into_owned()))
        .collect();

    let expected: Vec<(String, String)> = params
        .iter()
        .map(|p| (p.name.clone(), p.value.to_wire()))
        .collect();
    assert_eq!(pairs, expected);
}
