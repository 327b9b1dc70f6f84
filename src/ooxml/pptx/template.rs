//! Default presentation template.
//!
//! Generates the parts every new deck starts from: the Office theme, one
//! slide master, the slide layouts of [`default_layouts`](super::layout::default_layouts),
//! and the presentation/view/table-style property parts.

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::layout::{
    PlaceholderSize, PlaceholderSpec, PlaceholderType, SlideLayout, master_geometry,
};
use crate::ooxml::pptx::writer::shape::write_placeholder_sp;
use std::fmt::Write as FmtWrite;

/// First ID of the `sldLayoutIdLst`; the master itself is 2147483648.
pub(crate) const FIRST_LAYOUT_ID: u32 = 2_147_483_649;

/// Slide master ID written in `sldMasterIdLst`.
pub(crate) const SLIDE_MASTER_ID: u32 = 2_147_483_648;

const PML_NAMESPACES: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const EMPTY_GROUP_PROPERTIES: &str = r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#;

/// The Office theme: color, font and format schemes.
pub fn default_theme_xml() -> String {
    let mut xml = String::with_capacity(8192);

    xml.push_str(XML_DECLARATION);
    xml.push_str(r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements>"#);

    xml.push_str(r#"<a:clrScheme name="Office">"#);
    xml.push_str(r#"<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>"#);
    xml.push_str(r#"<a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>"#);
    for (slot, rgb) in [
        ("dk2", "1F497D"),
        ("lt2", "EEECE1"),
        ("accent1", "4F81BD"),
        ("accent2", "C0504D"),
        ("accent3", "9BBB59"),
        ("accent4", "8064A2"),
        ("accent5", "4BACC6"),
        ("accent6", "F79646"),
        ("hlink", "0000FF"),
        ("folHlink", "800080"),
    ] {
        xml.push_str(&format!(r#"<a:{slot}><a:srgbClr val="{rgb}"/></a:{slot}>"#));
    }
    xml.push_str("</a:clrScheme>");

    xml.push_str(r#"<a:fontScheme name="Office">"#);
    xml.push_str(r#"<a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#);
    xml.push_str(r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#);
    xml.push_str("</a:fontScheme>");

    xml.push_str(r#"<a:fmtScheme name="Office"><a:fillStyleLst>"#);
    xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
    xml.push_str(r#"<a:gradFill rotWithShape="1"><a:gsLst><a:gs pos="0"><a:schemeClr val="phClr"><a:tint val="50000"/><a:satMod val="300000"/></a:schemeClr></a:gs><a:gs pos="35000"><a:schemeClr val="phClr"><a:tint val="37000"/><a:satMod val="300000"/></a:schemeClr></a:gs><a:gs pos="100000"><a:schemeClr val="phClr"><a:tint val="15000"/><a:satMod val="350000"/></a:schemeClr></a:gs></a:gsLst><a:lin ang="16200000" scaled="1"/></a:gradFill>"#);
    xml.push_str(r#"<a:gradFill rotWithShape="1"><a:gsLst><a:gs pos="0"><a:schemeClr val="phClr"><a:shade val="51000"/><a:satMod val="130000"/></a:schemeClr></a:gs><a:gs pos="80000"><a:schemeClr val="phClr"><a:shade val="93000"/><a:satMod val="130000"/></a:schemeClr></a:gs><a:gs pos="100000"><a:schemeClr val="phClr"><a:shade val="94000"/><a:satMod val="135000"/></a:schemeClr></a:gs></a:gsLst><a:lin ang="16200000" scaled="0"/></a:gradFill>"#);
    xml.push_str("</a:fillStyleLst><a:lnStyleLst>");
    for (width, shade) in [(9525, 95000), (25400, 0), (38100, 0)] {
        let color = if shade > 0 {
            format!(r#"<a:schemeClr val="phClr"><a:shade val="{shade}"/><a:satMod val="105000"/></a:schemeClr>"#)
        } else {
            r#"<a:schemeClr val="phClr"/>"#.to_string()
        };
        xml.push_str(&format!(
            r#"<a:ln w="{width}" cap="flat" cmpd="sng" algn="ctr"><a:solidFill>{color}</a:solidFill><a:prstDash val="solid"/></a:ln>"#
        ));
    }
    xml.push_str("</a:lnStyleLst><a:effectStyleLst>");
    for _ in 0..3 {
        xml.push_str(r#"<a:effectStyle><a:effectLst><a:outerShdw blurRad="40000" dist="23000" dir="5400000" rotWithShape="0"><a:srgbClr val="000000"><a:alpha val="35000"/></a:srgbClr></a:outerShdw></a:effectLst></a:effectStyle>"#);
    }
    xml.push_str("</a:effectStyleLst><a:bgFillStyleLst>");
    xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
    xml.push_str(r#"<a:gradFill rotWithShape="1"><a:gsLst><a:gs pos="0"><a:schemeClr val="phClr"><a:tint val="40000"/><a:satMod val="350000"/></a:schemeClr></a:gs><a:gs pos="100000"><a:schemeClr val="phClr"><a:shade val="20000"/><a:satMod val="255000"/></a:schemeClr></a:gs></a:gsLst><a:path path="circle"><a:fillToRect l="50000" t="-80000" r="50000" b="180000"/></a:path></a:gradFill>"#);
    xml.push_str(r#"<a:gradFill rotWithShape="1"><a:gsLst><a:gs pos="0"><a:schemeClr val="phClr"><a:tint val="80000"/><a:satMod val="300000"/></a:schemeClr></a:gs><a:gs pos="100000"><a:schemeClr val="phClr"><a:shade val="30000"/><a:satMod val="200000"/></a:schemeClr></a:gs></a:gsLst><a:path path="circle"><a:fillToRect l="50000" t="50000" r="50000" b="50000"/></a:path></a:gradFill>"#);
    xml.push_str("</a:bgFillStyleLst></a:fmtScheme>");

    xml.push_str("</a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>");
    xml
}

/// The slide master.
///
/// `layout_rel_ids` are the master's relationship IDs to each layout, in
/// layout order.
pub fn slide_master_xml(layout_rel_ids: &[String]) -> Result<String> {
    let mut xml = String::with_capacity(8192);

    xml.push_str(XML_DECLARATION);
    write!(xml, "<p:sldMaster {}>", PML_NAMESPACES).map_err(|e| OoxmlError::Xml(e.to_string()))?;
    xml.push_str("<p:cSld>");
    xml.push_str(r#"<p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>"#);
    xml.push_str("<p:spTree>");
    xml.push_str(EMPTY_GROUP_PROPERTIES);

    let master_placeholders = [
        (PlaceholderType::Title, 0, PlaceholderSize::Full, master_geometry::TITLE),
        (PlaceholderType::Body, 1, PlaceholderSize::Full, master_geometry::BODY),
        (PlaceholderType::DateAndTime, 2, PlaceholderSize::Half, master_geometry::DATE),
        (PlaceholderType::Footer, 3, PlaceholderSize::Quarter, master_geometry::FOOTER),
        (PlaceholderType::SlideNumber, 4, PlaceholderSize::Quarter, master_geometry::SLIDE_NUMBER),
    ];
    for (shape_id, (ph_type, idx, size, rect)) in (2u32..).zip(master_placeholders) {
        let spec = PlaceholderSpec {
            ph_type,
            idx,
            vertical: false,
            size,
            geometry: Some(rect),
        };
        let name = format!("{} {}", ph_type.base_name(false), shape_id - 1);
        write_placeholder_sp(&mut xml, shape_id, &name, &spec, Some(rect))?;
        write_prompt_body(&mut xml, ph_type)?;
    }

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str(r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#);

    xml.push_str("<p:sldLayoutIdLst>");
    for (layout_id, r_id) in (FIRST_LAYOUT_ID..).zip(layout_rel_ids) {
        write!(xml, r#"<p:sldLayoutId id="{}" r:id="{}"/>"#, layout_id, r_id)
            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
    }
    xml.push_str("</p:sldLayoutIdLst>");

    write_text_styles(&mut xml)?;
    xml.push_str("</p:sldMaster>");
    Ok(xml)
}

/// A slide layout part.
pub fn slide_layout_xml(layout: &SlideLayout) -> Result<String> {
    let mut xml = String::with_capacity(4096);

    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:sldLayout {} type="{}" preserve="1">"#,
        PML_NAMESPACES,
        layout.layout_type()
    )
    .map_err(|e| OoxmlError::Xml(e.to_string()))?;
    write!(xml, r#"<p:cSld name="{}"><p:spTree>"#, layout.name())
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
    xml.push_str(EMPTY_GROUP_PROPERTIES);

    for (shape_id, spec) in (2u32..).zip(layout.placeholders()) {
        let name = format!("{} {}", spec.ph_type.base_name(spec.vertical), shape_id - 1);
        write_placeholder_sp(&mut xml, shape_id, &name, spec, spec.geometry)?;
        write_prompt_body(&mut xml, spec.ph_type)?;
    }

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sldLayout>");
    Ok(xml)
}

/// Text body with the prompt PowerPoint shows in an empty placeholder.
fn write_prompt_body(xml: &mut String, ph_type: PlaceholderType) -> Result<()> {
    let prompt = match ph_type {
        PlaceholderType::Title | PlaceholderType::CenterTitle => "Click to edit Master title style",
        PlaceholderType::SubTitle => "Click to edit Master subtitle style",
        PlaceholderType::DateAndTime | PlaceholderType::Footer | PlaceholderType::SlideNumber => "",
        _ => "Click to edit Master text styles",
    };

    xml.push_str("<p:txBody><a:bodyPr/><a:lstStyle/>");
    if prompt.is_empty() {
        xml.push_str("<a:p/>");
    } else {
        write!(
            xml,
            r#"<a:p><a:r><a:rPr lang="en-US"/><a:t>{}</a:t></a:r></a:p>"#,
            prompt
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
    }
    xml.push_str("</p:txBody></p:sp>");
    Ok(())
}

/// Title, body and other text styles of the master.
fn write_text_styles(xml: &mut String) -> Result<()> {
    xml.push_str("<p:txStyles>");

    xml.push_str("<p:titleStyle>");
    xml.push_str(r#"<a:lvl1pPr algn="ctr" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1"><a:spcBef><a:spcPct val="0"/></a:spcBef><a:buNone/><a:defRPr sz="4400" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mj-lt"/><a:ea typeface="+mj-ea"/><a:cs typeface="+mj-cs"/></a:defRPr></a:lvl1pPr>"#);
    xml.push_str("</p:titleStyle>");

    // Bullet character and size per outline level.
    let body_levels = [
        (342900, -342900, "\u{2022}", 3200),
        (742950, -285750, "\u{2013}", 2800),
        (1143000, -228600, "\u{2022}", 2400),
        (1600200, -228600, "\u{2013}", 2000),
        (2057400, -228600, "\u{00BB}", 2000),
    ];
    xml.push_str("<p:bodyStyle>");
    for (level, (mar_l, indent, bullet, size)) in (1..).zip(body_levels) {
        write!(
            xml,
            r#"<a:lvl{level}pPr marL="{mar_l}" indent="{indent}" algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1"><a:spcBef><a:spcPct val="20000"/></a:spcBef><a:buFont typeface="Arial"/><a:buChar char="{bullet}"/><a:defRPr sz="{size}" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/></a:defRPr></a:lvl{level}pPr>"#
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
    }
    xml.push_str("</p:bodyStyle>");

    xml.push_str("<p:otherStyle>");
    xml.push_str(r#"<a:defPPr><a:defRPr lang="en-US"/></a:defPPr>"#);
    xml.push_str(r#"<a:lvl1pPr marL="0" algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1"><a:defRPr sz="1800" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/></a:defRPr></a:lvl1pPr>"#);
    xml.push_str("</p:otherStyle>");

    xml.push_str("</p:txStyles>");
    Ok(())
}

pub fn default_pres_props_xml() -> String {
    let mut xml = String::with_capacity(256);
    xml.push_str(XML_DECLARATION);
    xml.push_str(r#"<p:presentationPr xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"/>"#);
    xml
}

pub fn default_view_props_xml() -> String {
    let mut xml = String::with_capacity(768);
    xml.push_str(XML_DECLARATION);
    xml.push_str(&format!("<p:viewPr {}>", PML_NAMESPACES));
    xml.push_str(r#"<p:normalViewPr><p:restoredLeft sz="15620"/><p:restoredTop sz="94660"/></p:normalViewPr>"#);
    xml.push_str(r#"<p:slideViewPr><p:cSldViewPr><p:cViewPr varScale="1"><p:scale><a:sx n="100" d="100"/><a:sy n="100" d="100"/></p:scale><p:origin x="0" y="0"/></p:cViewPr><p:guideLst/></p:cSldViewPr></p:slideViewPr>"#);
    xml.push_str(r#"<p:notesTextViewPr><p:cViewPr><p:scale><a:sx n="100" d="100"/><a:sy n="100" d="100"/></p:scale><p:origin x="0" y="0"/></p:cViewPr></p:notesTextViewPr>"#);
    xml.push_str(r#"<p:gridSpacing cx="76200" cy="76200"/>"#);
    xml.push_str("</p:viewPr>");
    xml
}

/// Table styles part pointing at the default "Medium Style 2 - Accent 1".
pub fn default_table_styles_xml() -> String {
    let mut xml = String::with_capacity(256);
    xml.push_str(XML_DECLARATION);
    xml.push_str(r#"<a:tblStyleLst xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" def="{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}"/>"#);
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::layout::default_layouts;
    use quick_xml::Reader;
    use quick_xml::events::Event;

    /// Parse the whole document, failing on malformed XML.
    fn assert_well_formed(xml: &str) {
        let mut reader = Reader::from_str(xml);
        let mut depth = 0i32;
        loop {
            match reader.read_event() {
                Ok(Event::Start(_)) => depth += 1,
                Ok(Event::End(_)) => depth -= 1,
                Ok(Event::Eof) => break,
                Ok(_) => {},
                Err(e) => panic!("malformed XML: {e}"),
            }
        }
        assert_eq!(depth, 0);
    }

    #[test]
    fn test_theme_is_well_formed() {
        let xml = default_theme_xml();
        assert_well_formed(&xml);
        assert!(xml.contains(r#"<a:accent1><a:srgbClr val="4F81BD"/></a:accent1>"#));
    }

    #[test]
    fn test_master_lists_every_layout() {
        let rel_ids: Vec<String> = (1..=11).map(|n| format!("rId{n}")).collect();
        let xml = slide_master_xml(&rel_ids).unwrap();

        assert_well_formed(&xml);
        assert_eq!(xml.matches("<p:sldLayoutId ").count(), 11);
        assert!(xml.contains(r#"<p:sldLayoutId id="2147483649" r:id="rId1"/>"#));
        assert!(xml.contains(r#"<p:sldLayoutId id="2147483659" r:id="rId11"/>"#));
        assert!(xml.contains(r#"<p:ph type="title"/>"#));
    }

    #[test]
    fn test_layouts_are_well_formed() {
        for layout in default_layouts() {
            let xml = slide_layout_xml(&layout).unwrap();
            assert_well_formed(&xml);
            assert!(xml.contains(&format!(r#"<p:cSld name="{}">"#, layout.name())));
        }
    }

    #[test]
    fn test_title_and_content_layout_placeholders() {
        let layouts = default_layouts();
        let xml = slide_layout_xml(&layouts[1]).unwrap();

        assert!(xml.contains(r#"type="obj""#));
        assert!(xml.contains(r#"<p:ph type="title"/>"#));
        assert!(xml.contains(r#"<p:ph idx="1"/>"#));
        assert!(xml.contains(r#"<p:ph type="dt" sz="half" idx="10"/>"#));
    }

    #[test]
    fn test_property_parts_are_well_formed() {
        assert_well_formed(&default_pres_props_xml());
        assert_well_formed(&default_view_props_xml());
        assert_well_formed(&default_table_styles_xml());
    }
}
