//! Dation SOAP workflow
//!
//! Every call is a single blocking SOAP exchange. Calls that depend on each
//! other (login after school lookup, one overview per course...) are issued
//! strictly in sequence, and the first failure aborts the whole workflow.
//!
//! # Example
//!
//! ```no_run
//! use dationservice::DationClient;
//!
//! let client = DationClient::new();
//! let schedule = client.fetch_schedule(
//!     "https://www.dation.nl/soap/server.php",
//!     "myschool",
//!     "student",
//!     "secret",
//! )?;
//! println!("{} planned items", schedule.items.len());
//! # Ok::<(), dationservice::DationError>(())
//! ```

use crate::error::Result;
use crate::models::{
    Address, AgendaItem, CourseInfo, DrivingSchoolInfo, LoginInfo, Schedule, display, integer,
    mapping, sequence, text, timestamp,
};
use dationsoap::schema::{array, field, object, object_schema};
use dationsoap::{HttpTransport, Param, SoapClient, SoapTransport};
use std::time::Duration;
use tracing::{debug, info};

/// `RemoteIp` sent at login, as the official mobile app does
const LOGIN_REMOTE_IP: &str = "android";

/// Client for the Dation driving-school SOAP service
#[derive(Debug, Clone, Default)]
pub struct DationClient<T = HttpTransport> {
    soap: SoapClient<T>,
}

impl DationClient<HttpTransport> {
    /// Create a client with the default HTTP timeout
    pub fn new() -> Self {
        Self::with_transport(HttpTransport::new())
    }

    /// Create a client whose requests time out after `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_transport(HttpTransport::with_timeout(timeout))
    }
}

impl<T: SoapTransport> DationClient<T> {
    /// Create a client on top of any SOAP transport
    pub fn with_transport(transport: T) -> Self {
        Self {
            soap: SoapClient::with_transport(transport),
        }
    }

    /// Get the underlying SOAP client
    pub fn soap_client(&self) -> &SoapClient<T> {
        &self.soap
    }

    /// Look up a driving school by its public handle
    ///
    /// `soap_endpoint` is the generic Dation entry point; the returned
    /// `web_service_url` must be used for every later call.
    pub fn get_driving_school_info(
        &self,
        soap_endpoint: &str,
        handle: &str,
    ) -> Result<DrivingSchoolInfo> {
        let values = self.soap.call_and_parse(
            soap_endpoint,
            "Rijschool/Info",
            "WS_Rijschool_Info",
            "Rijschool_Info_Request",
            &[Param::string("Handle", handle), Param::int("studentId", 0)],
            "Rijschool_Info_Response",
            &[field("Id"), field("Naam"), field("WebServiceURL")],
        )?;

        let info = DrivingSchoolInfo {
            id: integer(&values, "Id")?,
            name: text(&values, "Naam")?,
            web_service_url: text(&values, "WebServiceURL")?,
        };
        debug!(school_id = info.id, url = %info.web_service_url, "Driving school resolved");
        Ok(info)
    }

    /// Open a student session
    pub fn student_login(
        &self,
        school: &DrivingSchoolInfo,
        username: &str,
        password: &str,
    ) -> Result<LoginInfo> {
        let values = self.soap.call_and_parse(
            &school.web_service_url,
            "Rijschool/Login_Leerling",
            "WS_Rijschool_Login_Leerling",
            "Rijschool_Login_Leerling_Request",
            &[
                Param::int("RijschoolId", school.id),
                Param::string("Username", username),
                Param::string("Password", password),
                Param::string("RemoteIp", LOGIN_REMOTE_IP),
            ],
            "Rijschool_Login_Leerling_Response",
            &[field("SessionId"), object("Leerling", vec![field("Id")])],
        )?;

        let login = LoginInfo {
            session_id: text(&values, "SessionId")?,
            student_id: integer(mapping(&values, "Leerling")?, "Id")?,
        };
        debug!(student_id = login.student_id, "Student logged in");
        Ok(login)
    }

    /// List the student's courses, including finished ones
    pub fn get_student_courses(
        &self,
        school: &DrivingSchoolInfo,
        login: &LoginInfo,
    ) -> Result<Vec<CourseInfo>> {
        let values = self.soap.call_and_parse(
            &school.web_service_url,
            "Leerling/GetCursussen",
            "WS_Leerlingen_GetCursussen",
            "Leerlingen_GetCursussen_Request",
            &[
                Param::int("RijschoolId", school.id),
                Param::string("SessionId", &login.session_id),
                Param::int("LeerlingId", login.student_id),
                Param::int("FinishedCourses", 1),
            ],
            "Leerling_GetCursussen_Response",
            &[array(
                "Cursussen",
                object_schema(
                    "item",
                    vec![field("Id"), field("PakketNaam"), field("Category")],
                ),
            )],
        )?;

        sequence(&values, "Cursussen")?
            .iter()
            .map(|course| -> Result<CourseInfo> {
                Ok(CourseInfo {
                    id: integer(course, "Id")?,
                    type_name: text(course, "PakketNaam")?,
                    category: text(course, "Category")?,
                })
            })
            .collect()
    }

    /// Get the planned agenda items of one course
    pub fn get_course_agenda(
        &self,
        school: &DrivingSchoolInfo,
        login: &LoginInfo,
        course: &CourseInfo,
    ) -> Result<Vec<AgendaItem>> {
        let values = self.soap.call_and_parse(
            &school.web_service_url,
            "Rijschool/Overzicht",
            "WS_Cursus_Overzicht",
            "Cursus_Overzicht_Request",
            &[
                Param::int("RijschoolId", school.id),
                Param::string("SessionId", &login.session_id),
                Param::int("CursusId", course.id),
            ],
            "Cursus_Overzicht_Response",
            &[array(
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
            )],
        )?;

        sequence(&values, "Items")?
            .iter()
            .map(|item| -> Result<AgendaItem> {
                Ok(AgendaItem {
                    id: integer(item, "Id")?,
                    name: text(mapping(item, "ItemType")?, "Naam")?,
                    instructor: text(mapping(item, "Instructeur")?, "Naam")?,
                    start_time: timestamp(item, "Start")?,
                    stop_time: timestamp(item, "Stop")?,
                    comment: text(item, "Opmerkingen")?,
                    course_info: course.clone(),
                })
            })
            .collect()
    }

    /// Get the planned agenda items of every course of the student
    ///
    /// One overview call is made per course, in course order.
    pub fn get_student_planned_courses(
        &self,
        school: &DrivingSchoolInfo,
        login: &LoginInfo,
    ) -> Result<Vec<AgendaItem>> {
        let courses = self.get_student_courses(school, login)?;
        debug!(count = courses.len(), "Courses listed");

        let mut items = Vec::new();
        for course in &courses {
            items.extend(self.get_course_agenda(school, login, course)?);
        }
        Ok(items)
    }

    /// Get the postal address of the driving school
    pub fn get_driving_school_address(
        &self,
        school: &DrivingSchoolInfo,
        login: &LoginInfo,
    ) -> Result<Address> {
        let values = self.soap.call_and_parse(
            &school.web_service_url,
            "Rijschool/Info",
            "WS_Rijschool_NAW",
            "Rijschool_NAW_Request",
            &[
                Param::int("RijschoolId", school.id),
                Param::string("SessionId", &login.session_id),
                Param::int("studentId", login.student_id),
            ],
            "Rijschool_NAW_Response",
            &[
                field("Straatnaam"),
                field("Huisnummer"),
                field("Toevoeging"),
                field("Postcode"),
                field("Plaats"),
            ],
        )?;

        Ok(Address {
            street: text(&values, "Straatnaam")?,
            housenumber: format!(
                "{}{}",
                display(&values, "Huisnummer")?,
                display(&values, "Toevoeging")?
            ),
            zipcode: display(&values, "Postcode")?,
            city: text(&values, "Plaats")?,
        })
    }

    /// Run the whole workflow: school lookup, login, agenda and address
    pub fn fetch_schedule(
        &self,
        soap_endpoint: &str,
        handle: &str,
        username: &str,
        password: &str,
    ) -> Result<Schedule> {
        let school = self.get_driving_school_info(soap_endpoint, handle)?;
        let login = self.student_login(&school, username, password)?;
        let items = self.get_student_planned_courses(&school, &login)?;
        let address = self.get_driving_school_address(&school, &login)?;

        info!(
            school = %school.name,
            items = items.len(),
            "Schedule fetched"
        );
        Ok(Schedule { address, items })
    }
}
