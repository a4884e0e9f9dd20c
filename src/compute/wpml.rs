//! Waypoint mission (WPML) export for planned flight paths.
//!
//! Produces the `waylines.wpml` document a DJI flight controller reads:
//! a KML tree with `wpml:` mission settings and one Placemark per waypoint.
//! Packaging into a KMZ archive is left to the caller.

use crate::error::{PlanError, Result};
use aerosweep_types::{DroneProfile, FlightPathResult, Waypoint};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::{self, Write};

const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";
const WPML_NAMESPACE: &str = "http://www.dji.com/wpmz/1.0.2";

/// Height in meters the aircraft climbs to before heading for the first waypoint.
const TAKEOFF_SECURITY_HEIGHT: &str = "20";
/// Return-to-home height in meters.
const RTH_HEIGHT: &str = "30";

/// Renders a flight path as a WPML mission document.
///
/// Every waypoint becomes a Placemark carrying its index, position,
/// altitude, heading and the drone's cruise speed, followed by a photo
/// trigger on arrival. Headings are written in the controller's signed
/// convention, (-180, 180] degrees clockwise from north.
///
/// # Examples
///
/// ```
/// use aerosweep::{DroneProfile, generate_flight_path};
/// use aerosweep::compute::wpml::flight_path_to_wpml;
///
/// let field = [[0.0, 0.0], [0.005, 0.0], [0.005, 0.005], [0.0, 0.005]];
/// let drone = DroneProfile::new("M3E", 84.0, 100.0, 70.0, 12.0);
/// let result = generate_flight_path(&field, &drone).unwrap();
///
/// let wpml = flight_path_to_wpml(&result, &drone).unwrap();
/// assert!(wpml.starts_with("<?xml"));
/// assert_eq!(wpml.matches("<Placemark>").count(), result.len());
/// ```
pub fn flight_path_to_wpml(result: &FlightPathResult, drone: &DroneProfile) -> Result<String> {
    let bytes = write_mission(result, drone)
        .map_err(|e| PlanError::Serialization(format!("Failed to write WPML: {}", e)))?;

    String::from_utf8(bytes)
        .map_err(|e| PlanError::Serialization(format!("WPML output is not UTF-8: {}", e)))
}

/// Bearing in [0, 360) mapped to the signed heading range.
pub fn signed_heading(bearing: f64) -> f64 {
    if bearing > 180.0 {
        bearing - 360.0
    } else {
        bearing
    }
}

fn write_mission(result: &FlightPathResult, drone: &DroneProfile) -> io::Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let speed = drone.speed.to_string();

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut kml = BytesStart::new("kml");
    kml.push_attribute(("xmlns", KML_NAMESPACE));
    kml.push_attribute(("xmlns:wpml", WPML_NAMESPACE));
    writer.write_event(Event::Start(kml))?;
    start(&mut writer, "Document")?;

    start(&mut writer, "wpml:missionConfig")?;
    text_element(&mut writer, "wpml:flyToWaylineMode", "safely")?;
    text_element(&mut writer, "wpml:finishAction", "goHome")?;
    text_element(&mut writer, "wpml:exitOnRCLost", "executeLostAction")?;
    text_element(&mut writer, "wpml:executeRCLostAction", "goBack")?;
    text_element(&mut writer, "wpml:takeOffSecurityHeight", TAKEOFF_SECURITY_HEIGHT)?;
    text_element(&mut writer, "wpml:globalTransitionalSpeed", &speed)?;
    text_element(&mut writer, "wpml:globalRTHHeight", RTH_HEIGHT)?;
    end(&mut writer, "wpml:missionConfig")?;

    start(&mut writer, "Folder")?;
    text_element(&mut writer, "wpml:templateId", "0")?;
    text_element(&mut writer, "wpml:executeHeightMode", "relativeToStartPoint")?;
    text_element(&mut writer, "wpml:waylineId", "0")?;
    text_element(&mut writer, "wpml:autoFlightSpeed", &speed)?;

    for (index, waypoint) in result.waypoints.iter().enumerate() {
        write_placemark(&mut writer, index, waypoint, &speed)?;
    }

    end(&mut writer, "Folder")?;
    end(&mut writer, "Document")?;
    end(&mut writer, "kml")?;

    Ok(writer.into_inner())
}

fn write_placemark<W: Write>(
    writer: &mut Writer<W>,
    index: usize,
    waypoint: &Waypoint,
    speed: &str,
) -> io::Result<()> {
    let index = index.to_string();

    start(writer, "Placemark")?;

    start(writer, "Point")?;
    let coordinates = format!("{:.8},{:.8}", waypoint.longitude(), waypoint.latitude());
    text_element(writer, "coordinates", &coordinates)?;
    end(writer, "Point")?;

    text_element(writer, "wpml:index", &index)?;
    text_element(writer, "wpml:executeHeight", &waypoint.altitude.to_string())?;
    text_element(writer, "wpml:waypointSpeed", speed)?;

    start(writer, "wpml:waypointHeadingParam")?;
    text_element(writer, "wpml:waypointHeadingMode", "smoothTransition")?;
    text_element(
        writer,
        "wpml:waypointHeadingAngle",
        &signed_heading(waypoint.bearing).to_string(),
    )?;
    end(writer, "wpml:waypointHeadingParam")?;

    start(writer, "wpml:waypointTurnParam")?;
    text_element(
        writer,
        "wpml:waypointTurnMode",
        "toPointAndStopWithDiscontinuityCurvature",
    )?;
    text_element(writer, "wpml:waypointTurnDampingDist", "0")?;
    end(writer, "wpml:waypointTurnParam")?;

    start(writer, "wpml:actionGroup")?;
    text_element(writer, "wpml:actionGroupId", &index)?;
    text_element(writer, "wpml:actionGroupStartIndex", &index)?;
    text_element(writer, "wpml:actionGroupEndIndex", &index)?;
    text_element(writer, "wpml:actionGroupMode", "sequence")?;
    start(writer, "wpml:actionTrigger")?;
    text_element(writer, "wpml:actionTriggerType", "reachPoint")?;
    end(writer, "wpml:actionTrigger")?;
    start(writer, "wpml:action")?;
    text_element(writer, "wpml:actionId", "0")?;
    text_element(writer, "wpml:actionActuatorFunc", "takePhoto")?;
    start(writer, "wpml:actionActuatorFuncParam")?;
    text_element(writer, "wpml:fileSuffix", &index)?;
    text_element(writer, "wpml:payloadPositionIndex", "0")?;
    end(writer, "wpml:actionActuatorFuncParam")?;
    end(writer, "wpml:action")?;
    end(writer, "wpml:actionGroup")?;

    end(writer, "Placemark")
}

fn start<W: Write>(writer: &mut Writer<W>, name: &str) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))
}

fn end<W: Write>(writer: &mut Writer<W>, name: &str) -> io::Result<()> {
    writer.write_event(Event::End(BytesEnd::new(name)))
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> io::Result<()> {
    start(writer, name)?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    end(writer, name)
}
