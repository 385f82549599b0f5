// Dead code detection breaks here, because the integration test crates all use a disjoint set of
// the pub items.
#![allow(dead_code)]

use std::{fs, path::Path};

use tempfile::TempDir;

/// Wrap a `<compounddef>` body in a complete doxygen document.
pub fn compound(id: &str, kind: &str, name: &str, body: &str) -> String {
    format!(
        r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygen version="1.9.1" xml:lang="en-US">
  <compounddef id="{id}" kind="{kind}" language="PHP" prot="public">
    <compoundname>{name}</compoundname>
{body}
  </compounddef>
</doxygen>
"#
    )
}

/// A `<sectiondef>` holding the given member definitions.
pub fn section(kind: &str, members: &[String]) -> String {
    format!(
        "    <sectiondef kind=\"{kind}\">\n{}\n    </sectiondef>",
        members.join("\n")
    )
}

/// A declared parameter: `(type markup, name, escaped default)`.
pub type Param<'a> = (&'a str, &'a str, Option<&'a str>);

/// A `<memberdef kind="function">`. `brief` and `detailed` are raw XML placed
/// inside the description elements.
pub fn method(
    id: &str,
    definition: &str,
    params: &[Param<'_>],
    brief: &str,
    detailed: &str,
) -> String {
    let params: String = params
        .iter()
        .map(|(type_, name, default)| {
            let default = default
                .map(|value| format!("<defval>{value}</defval>"))
                .unwrap_or_default();
            format!("<param><type>{type_}</type><declname>{name}</declname>{default}</param>")
        })
        .collect();
    format!(
        r#"      <memberdef kind="function" id="{id}" prot="public" static="no">
        <type></type>
        <definition>{definition}</definition>
        <argsstring>()</argsstring>
        {params}
        <briefdescription>{brief}</briefdescription>
        <detaileddescription>{detailed}</detaileddescription>
      </memberdef>"#
    )
}

/// A base class reference. `None` leaves out the refid, as doxygen does for
/// undocumented bases.
pub fn base(refid: Option<&str>, name: &str) -> String {
    match refid {
        Some(refid) => format!(
            "    <basecompoundref refid=\"{refid}\" prot=\"public\" virt=\"non-virtual\">{name}</basecompoundref>"
        ),
        None => format!(
            "    <basecompoundref prot=\"public\" virt=\"non-virtual\">{name}</basecompoundref>"
        ),
    }
}

/// An `index.xml` listing `(refid, kind, name)` compounds.
pub fn index(entries: &[(&str, &str, &str)]) -> String {
    let compounds: String = entries
        .iter()
        .map(|(refid, kind, name)| {
            format!("  <compound refid=\"{refid}\" kind=\"{kind}\"><name>{name}</name></compound>\n")
        })
        .collect();
    format!(
        "<?xml version='1.0' encoding='UTF-8' standalone='no'?>\n<doxygenindex version=\"1.9.1\">\n{compounds}</doxygenindex>\n"
    )
}

/// Write `<refid>.xml` files into `dir`.
pub fn write_files(dir: &Path, files: &[(&str, String)]) {
    for (refid, xml) in files {
        fs::write(dir.join(format!("{refid}.xml")), xml).unwrap();
    }
}

/// A small PHP project in the `Geometry` namespace.
///
/// `Circle` extends `Shape`, implements `Drawable`, and overrides `area`.
/// The root namespace also lists `Vendor::Lib`, which lies outside it and
/// has no document at all.
pub fn geometry_files() -> Vec<(&'static str, String)> {
    vec![
        (
            "index",
            index(&[
                ("namespace_geometry", "namespace", "Geometry"),
                ("namespace_geometry_1_1_solid", "namespace", "Geometry::Solid"),
                ("namespace_vendor_1_1_lib", "namespace", "Vendor::Lib"),
                ("class_geometry_1_1_shape", "class", "Geometry::Shape"),
                ("class_geometry_1_1_circle", "class", "Geometry::Circle"),
                ("interface_geometry_1_1_drawable", "interface", "Geometry::Drawable"),
                ("class_geometry_1_1_solid_1_1_cube", "class", "Geometry::Solid::Cube"),
            ]),
        ),
        (
            "namespace_geometry",
            compound(
                "namespace_geometry",
                "namespace",
                "Geometry",
                r#"    <innerclass refid="class_geometry_1_1_shape" prot="public">Geometry::Shape</innerclass>
    <innerclass refid="class_geometry_1_1_circle" prot="public">Geometry::Circle</innerclass>
    <innerclass refid="interface_geometry_1_1_drawable" prot="public">Geometry::Drawable</innerclass>
    <innernamespace refid="namespace_geometry_1_1_solid">Geometry::Solid</innernamespace>
    <innernamespace refid="namespace_vendor_1_1_lib">Vendor::Lib</innernamespace>
    <briefdescription><para>Shapes for drawing.</para></briefdescription>
    <detaileddescription></detaileddescription>"#,
            ),
        ),
        (
            "namespace_geometry_1_1_solid",
            compound(
                "namespace_geometry_1_1_solid",
                "namespace",
                "Geometry::Solid",
                r#"    <innerclass refid="class_geometry_1_1_solid_1_1_cube" prot="public">Geometry::Solid::Cube</innerclass>
    <briefdescription></briefdescription>
    <detaileddescription><para>Three dimensional shapes.</para></detaileddescription>"#,
            ),
        ),
        (
            "class_geometry_1_1_shape",
            compound(
                "class_geometry_1_1_shape",
                "class",
                "Geometry::Shape",
                &[
                    section(
                        "public-func",
                        &[
                            method(
                                "shape_area",
                                "Geometry\\Shape::area",
                                &[],
                                "",
                                r#"<para><simplesect kind="return"><para>float The area.</para></simplesect></para>"#,
                            ),
                            method(
                                "shape_perimeter",
                                "Geometry\\Shape::perimeter",
                                &[],
                                "<para>Length of the outline.</para>",
                                r#"<para><simplesect kind="return"><para><ref refid="class_geometry_1_1_length" kindref="compound">Length</ref> in metres.</para></simplesect></para>"#,
                            ),
                        ],
                    ),
                    section(
                        "public-static-func",
                        &[method("shape_create", "Geometry\\Shape::create", &[], "", "")],
                    ),
                    section(
                        "private-func",
                        &[method("shape_secret", "Geometry\\Shape::secret", &[], "", "")],
                    ),
                ]
                .join("\n"),
            ),
        ),
        (
            "class_geometry_1_1_circle",
            compound(
                "class_geometry_1_1_circle",
                "class",
                "Geometry::Circle",
                &[
                    base(Some("class_geometry_1_1_shape"), "Geometry\\Shape"),
                    base(Some("interface_geometry_1_1_drawable"), "Geometry\\Drawable"),
                    section(
                        "public-func",
                        &[
                            method(
                                "circle_area",
                                "Geometry\\Circle::area",
                                &[],
                                "",
                                r#"<para>Area of the circle. <simplesect kind="return"><para>float The area.</para></simplesect></para>"#,
                            ),
                            method(
                                "circle_resize",
                                "Geometry\\Circle::resize",
                                &[("int", "$radius", None), ("string", "$label", Some("&quot;x&quot;"))],
                                "",
                                "",
                            ),
                        ],
                    ),
                    "    <briefdescription><para>A round shape.</para></briefdescription>".to_string(),
                ]
                .join("\n"),
            ),
        ),
        (
            "interface_geometry_1_1_drawable",
            compound(
                "interface_geometry_1_1_drawable",
                "interface",
                "Geometry::Drawable",
                &section(
                    "public-func",
                    &[method(
                        "drawable_draw",
                        "Geometry\\Drawable::draw",
                        &[("", "$canvas", None)],
                        "",
                        r#"<para><parameterlist kind="param"><parameteritem><parameternamelist><parametername>$canvas</parametername></parameternamelist><parameterdescription><para>Where to draw.</para></parameterdescription></parameteritem></parameterlist></para>"#,
                    )],
                ),
            ),
        ),
        (
            "class_geometry_1_1_solid_1_1_cube",
            compound(
                "class_geometry_1_1_solid_1_1_cube",
                "class",
                "Geometry::Solid::Cube",
                &base(Some("class_geometry_1_1_shape"), "Geometry\\Shape"),
            ),
        ),
    ]
}

/// Write the geometry project into a fresh temporary directory.
pub fn geometry() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_files(dir.path(), &geometry_files());
    dir
}

/// Read a generated page below `root`.
pub fn read_page(root: &Path, path: &str) -> String {
    fs::read_to_string(root.join(path)).unwrap()
}
