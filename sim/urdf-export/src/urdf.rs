//! URDF document generation.
//!
//! One document per assembly: a `<robot>` with one `<link>` per part and
//! one fixed `<joint>` per hierarchy edge. All parts are expressed in the
//! assembly's shared frame, so joint origins are zero and links reference
//! their exported surface meshes directly.
//!
//! The writer emits indented, multi-line XML; some URDF parsers fail on
//! large single-line documents.

use std::io::Cursor;

use part_graph::Part;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::assembly::Assembly;
use crate::error::{ExportError, ExportResult};

/// Robot name attribute shared by every emitted document.
pub const ROBOT_NAME: &str = "part_graph_shape";

/// Link color: mid-gray, fully opaque.
const GRAY_RGBA: &str = "0.5 0.5 0.5 1";

/// Render one assembly as a URDF document.
///
/// `parts` is the full decomposition; the assembly's `part_ids` select
/// members. Each link's mass is the part volume times `density`, and the
/// inertia tensor is the placeholder identity — a deliberate
/// simplification the downstream displacement threshold was tuned
/// against, not a value derived from the geometry.
///
/// # Errors
///
/// Returns [`ExportError::Xml`] if event writing fails.
pub fn urdf_document(assembly: &Assembly, parts: &[Part], density: f64) -> ExportResult<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    write_event(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;

    let mut robot = BytesStart::new("robot");
    robot.push_attribute(("name", ROBOT_NAME));
    write_event(&mut writer, Event::Start(robot))?;

    for &id in assembly.part_ids() {
        write_link(&mut writer, &parts[id], density)?;
    }
    for &(parent, child) in assembly.hierarchy().edges() {
        write_joint(&mut writer, parent, child)?;
    }

    write_event(&mut writer, Event::End(BytesEnd::new("robot")))?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| ExportError::xml(format!("invalid UTF-8: {e}")))
}

/// File name of the exported surface mesh for a part id.
#[must_use]
pub(crate) fn part_mesh_filename(id: usize) -> String {
    format!("part_{id}.stl")
}

fn write_link<W: std::io::Write>(
    writer: &mut Writer<W>,
    part: &Part,
    density: f64,
) -> ExportResult<()> {
    let link_name = format!("part_{}", part.id());
    let mesh_file = part_mesh_filename(part.id());

    let mut link = BytesStart::new("link");
    link.push_attribute(("name", link_name.as_str()));
    write_event(writer, Event::Start(link))?;

    // <visual> with the surface mesh and a gray material.
    write_event(writer, Event::Start(BytesStart::new("visual")))?;
    write_mesh_geometry(writer, &mesh_file)?;
    let mut material = BytesStart::new("material");
    material.push_attribute(("name", "gray"));
    write_event(writer, Event::Start(material))?;
    let mut color = BytesStart::new("color");
    color.push_attribute(("rgba", GRAY_RGBA));
    write_event(writer, Event::Empty(color))?;
    write_event(writer, Event::End(BytesEnd::new("material")))?;
    write_event(writer, Event::End(BytesEnd::new("visual")))?;

    // <collision> reuses the same mesh.
    write_event(writer, Event::Start(BytesStart::new("collision")))?;
    write_mesh_geometry(writer, &mesh_file)?;
    write_event(writer, Event::End(BytesEnd::new("collision")))?;

    // <inertial>: mass from volume, placeholder unit inertia.
    write_event(writer, Event::Start(BytesStart::new("inertial")))?;
    let mut mass = BytesStart::new("mass");
    let mass_value = format!("{}", part.volume() * density);
    mass.push_attribute(("value", mass_value.as_str()));
    write_event(writer, Event::Empty(mass))?;
    let mut inertia = BytesStart::new("inertia");
    for axis in ["ixx", "iyy", "izz"] {
        inertia.push_attribute((axis, "1.0"));
    }
    for axis in ["ixy", "ixz", "iyz"] {
        inertia.push_attribute((axis, "0.0"));
    }
    write_event(writer, Event::Empty(inertia))?;
    write_event(writer, Event::End(BytesEnd::new("inertial")))?;

    write_event(writer, Event::End(BytesEnd::new("link")))?;
    Ok(())
}

fn write_mesh_geometry<W: std::io::Write>(
    writer: &mut Writer<W>,
    mesh_file: &str,
) -> ExportResult<()> {
    write_event(writer, Event::Start(BytesStart::new("geometry")))?;
    let mut mesh = BytesStart::new("mesh");
    mesh.push_attribute(("filename", mesh_file));
    write_event(writer, Event::Empty(mesh))?;
    write_event(writer, Event::End(BytesEnd::new("geometry")))?;
    Ok(())
}

fn write_joint<W: std::io::Write>(
    writer: &mut Writer<W>,
    parent: usize,
    child: usize,
) -> ExportResult<()> {
    let mut joint = BytesStart::new("joint");
    let joint_name = format!("{parent}_to_{child}");
    joint.push_attribute(("name", joint_name.as_str()));
    joint.push_attribute(("type", "fixed"));
    write_event(writer, Event::Start(joint))?;

    let mut parent_el = BytesStart::new("parent");
    let parent_link = format!("part_{parent}");
    parent_el.push_attribute(("link", parent_link.as_str()));
    write_event(writer, Event::Empty(parent_el))?;

    let mut child_el = BytesStart::new("child");
    let child_link = format!("part_{child}");
    child_el.push_attribute(("link", child_link.as_str()));
    write_event(writer, Event::Empty(child_el))?;

    // Parts already share one frame; the joint offset is zero.
    let mut origin = BytesStart::new("origin");
    origin.push_attribute(("xyz", "0 0 0"));
    write_event(writer, Event::Empty(origin))?;

    write_event(writer, Event::End(BytesEnd::new("joint")))?;
    Ok(())
}

fn write_event<W: std::io::Write>(writer: &mut Writer<W>, event: Event<'_>) -> ExportResult<()> {
    writer
        .write_event(event)
        .map_err(|e| ExportError::xml(format!("failed to write XML event: {e}")))
}
