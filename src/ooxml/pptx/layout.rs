//! Slide layouts and their placeholder regions.
//!
//! A layout is a named arrangement of placeholders that slides are created
//! from. The default template carries the eleven standard Office layouts,
//! in the order PowerPoint lists them.

/// Placeholder type, as written in the `type` attribute of `<p:ph>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderType {
    /// Title placeholder (`title`)
    Title,
    /// Center title placeholder (`ctrTitle`)
    CenterTitle,
    /// Subtitle placeholder (`subTitle`)
    SubTitle,
    /// Body text placeholder (`body`)
    Body,
    /// Generic content placeholder (`obj`, the default when `type` is absent)
    Object,
    /// Picture placeholder (`pic`)
    Picture,
    /// Chart placeholder (`chart`)
    Chart,
    /// Table placeholder (`tbl`)
    Table,
    /// Clip art placeholder (`clipArt`)
    ClipArt,
    /// Diagram placeholder (`dgm`)
    Diagram,
    /// Media clip placeholder (`media`)
    Media,
    /// Slide image placeholder (`sldImg`)
    SlideImage,
    /// Header placeholder (`hdr`)
    Header,
    /// Date and time placeholder (`dt`)
    DateAndTime,
    /// Footer placeholder (`ftr`)
    Footer,
    /// Slide number placeholder (`sldNum`)
    SlideNumber,
}

impl PlaceholderType {
    /// Value of the `type` attribute, or `None` for `obj`, which is the default.
    pub fn ph_type(self) -> Option<&'static str> {
        match self {
            PlaceholderType::Title => Some("title"),
            PlaceholderType::CenterTitle => Some("ctrTitle"),
            PlaceholderType::SubTitle => Some("subTitle"),
            PlaceholderType::Body => Some("body"),
            PlaceholderType::Object => None,
            PlaceholderType::Picture => Some("pic"),
            PlaceholderType::Chart => Some("chart"),
            PlaceholderType::Table => Some("tbl"),
            PlaceholderType::ClipArt => Some("clipArt"),
            PlaceholderType::Diagram => Some("dgm"),
            PlaceholderType::Media => Some("media"),
            PlaceholderType::SlideImage => Some("sldImg"),
            PlaceholderType::Header => Some("hdr"),
            PlaceholderType::DateAndTime => Some("dt"),
            PlaceholderType::Footer => Some("ftr"),
            PlaceholderType::SlideNumber => Some("sldNum"),
        }
    }

    /// Parse the `type` attribute. Unknown values map to `Object`.
    pub fn from_ph_type(value: &str) -> Self {
        match value {
            "title" => PlaceholderType::Title,
            "ctrTitle" => PlaceholderType::CenterTitle,
            "subTitle" => PlaceholderType::SubTitle,
            "body" => PlaceholderType::Body,
            "pic" => PlaceholderType::Picture,
            "chart" => PlaceholderType::Chart,
            "tbl" => PlaceholderType::Table,
            "clipArt" => PlaceholderType::ClipArt,
            "dgm" => PlaceholderType::Diagram,
            "media" => PlaceholderType::Media,
            "sldImg" => PlaceholderType::SlideImage,
            "hdr" => PlaceholderType::Header,
            "dt" => PlaceholderType::DateAndTime,
            "ftr" => PlaceholderType::Footer,
            "sldNum" => PlaceholderType::SlideNumber,
            _ => PlaceholderType::Object,
        }
    }

    #[inline]
    pub fn is_title(self) -> bool {
        matches!(self, PlaceholderType::Title | PlaceholderType::CenterTitle)
    }

    /// Date, footer and slide number placeholders stay on the layout;
    /// everything else is copied onto new slides.
    #[inline]
    pub fn is_copied_to_slide(self) -> bool {
        !matches!(
            self,
            PlaceholderType::DateAndTime | PlaceholderType::Footer | PlaceholderType::SlideNumber
        )
    }

    /// Base of the shape name PowerPoint gives this placeholder ("Title 1").
    pub(crate) fn base_name(self, vertical: bool) -> &'static str {
        match (self, vertical) {
            (PlaceholderType::Title | PlaceholderType::CenterTitle, true) => "Vertical Title",
            (PlaceholderType::Title | PlaceholderType::CenterTitle, false) => "Title",
            (PlaceholderType::SubTitle, _) => "Subtitle",
            (PlaceholderType::Body, true) => "Vertical Text Placeholder",
            (PlaceholderType::Body, false) => "Text Placeholder",
            (PlaceholderType::Picture, _) => "Picture Placeholder",
            (PlaceholderType::DateAndTime, _) => "Date Placeholder",
            (PlaceholderType::Footer, _) => "Footer Placeholder",
            (PlaceholderType::SlideNumber, _) => "Slide Number Placeholder",
            (_, true) => "Vertical Content Placeholder",
            (_, false) => "Content Placeholder",
        }
    }
}

/// Relative size hint written as the `sz` attribute of `<p:ph>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderSize {
    Full,
    Half,
    Quarter,
}

impl PlaceholderSize {
    /// Attribute value, `None` for the default (`full`).
    pub fn sz(self) -> Option<&'static str> {
        match self {
            PlaceholderSize::Full => None,
            PlaceholderSize::Half => Some("half"),
            PlaceholderSize::Quarter => Some("quarter"),
        }
    }
}

/// Position and size in EMUs (914400 per inch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Rect {
    pub const fn new(x: i64, y: i64, cx: i64, cy: i64) -> Self {
        Self { x, y, cx, cy }
    }
}

/// One placeholder region of a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderSpec {
    pub ph_type: PlaceholderType,
    /// Placeholder index; the title is always 0.
    pub idx: u32,
    /// Vertical text orientation (`orient="vert"`)
    pub vertical: bool,
    pub size: PlaceholderSize,
    /// Explicit geometry, or `None` to inherit it from the master.
    pub geometry: Option<Rect>,
}

impl PlaceholderSpec {
    const fn new(ph_type: PlaceholderType, idx: u32) -> Self {
        Self {
            ph_type,
            idx,
            vertical: false,
            size: PlaceholderSize::Full,
            geometry: None,
        }
    }

    const fn at(mut self, geometry: Rect) -> Self {
        self.geometry = Some(geometry);
        self
    }

    const fn half(mut self) -> Self {
        self.size = PlaceholderSize::Half;
        self
    }

    const fn quarter(mut self) -> Self {
        self.size = PlaceholderSize::Quarter;
        self
    }

    const fn vertical(mut self) -> Self {
        self.vertical = true;
        self
    }
}

/// A named slide layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideLayout {
    name: &'static str,
    /// Value of the `type` attribute on `<p:sldLayout>`
    layout_type: &'static str,
    placeholders: Vec<PlaceholderSpec>,
}

impl SlideLayout {
    /// Create a layout; the date, footer and slide number placeholders are appended.
    fn new(name: &'static str, layout_type: &'static str, mut placeholders: Vec<PlaceholderSpec>) -> Self {
        placeholders.extend([
            PlaceholderSpec::new(PlaceholderType::DateAndTime, 10).half(),
            PlaceholderSpec::new(PlaceholderType::Footer, 11).quarter(),
            PlaceholderSpec::new(PlaceholderType::SlideNumber, 12).quarter(),
        ]);
        Self {
            name,
            layout_type,
            placeholders,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.name
    }

    #[inline]
    pub fn layout_type(&self) -> &str {
        self.layout_type
    }

    #[inline]
    pub fn placeholders(&self) -> &[PlaceholderSpec] {
        &self.placeholders
    }

    /// The title placeholder, if the layout has one.
    pub fn title(&self) -> Option<&PlaceholderSpec> {
        self.placeholders.iter().find(|ph| ph.ph_type.is_title())
    }

    /// The placeholder with index `idx`.
    pub fn placeholder(&self, idx: u32) -> Option<&PlaceholderSpec> {
        self.placeholders.iter().find(|ph| ph.idx == idx)
    }
}

/// Geometry of the slide master's placeholders on a 4:3 slide.
pub(crate) mod master_geometry {
    use super::Rect;

    pub const TITLE: Rect = Rect::new(457200, 274638, 8229600, 1143000);
    pub const BODY: Rect = Rect::new(457200, 1600200, 8229600, 4525963);
    pub const DATE: Rect = Rect::new(457200, 6356350, 2133600, 365125);
    pub const FOOTER: Rect = Rect::new(3124200, 6356350, 2895600, 365125);
    pub const SLIDE_NUMBER: Rect = Rect::new(6553200, 6356350, 2133600, 365125);
}

/// Index of the "Title and Content" layout in [`default_layouts`].
pub const TITLE_AND_CONTENT: usize = 1;

/// The eleven standard layouts of the default template.
pub fn default_layouts() -> Vec<SlideLayout> {
    use PlaceholderType::*;

    let title = || PlaceholderSpec::new(Title, 0);

    vec![
        SlideLayout::new(
            "Title Slide",
            "title",
            vec![
                PlaceholderSpec::new(CenterTitle, 0).at(Rect::new(685800, 2130425, 7772400, 1470025)),
                PlaceholderSpec::new(SubTitle, 1).at(Rect::new(1371600, 3886200, 6400800, 1752600)),
            ],
        ),
        SlideLayout::new(
            "Title and Content",
            "obj",
            vec![title(), PlaceholderSpec::new(Object, 1)],
        ),
        SlideLayout::new(
            "Section Header",
            "secHead",
            vec![
                title().at(Rect::new(722313, 4406900, 7772400, 1362075)),
                PlaceholderSpec::new(Body, 1).at(Rect::new(722313, 2906713, 7772400, 1500187)),
            ],
        ),
        SlideLayout::new(
            "Two Content",
            "twoObj",
            vec![
                title(),
                PlaceholderSpec::new(Object, 1)
                    .half()
                    .at(Rect::new(457200, 1600200, 4038600, 4525963)),
                PlaceholderSpec::new(Object, 2)
                    .half()
                    .at(Rect::new(4648200, 1600200, 4038600, 4525963)),
            ],
        ),
        SlideLayout::new(
            "Comparison",
            "twoTxTwoObj",
            vec![
                title(),
                PlaceholderSpec::new(Body, 1).at(Rect::new(457200, 1535113, 4040188, 639762)),
                PlaceholderSpec::new(Object, 2)
                    .half()
                    .at(Rect::new(457200, 2174875, 4040188, 3951288)),
                PlaceholderSpec::new(Body, 3)
                    .quarter()
                    .at(Rect::new(4645025, 1535113, 4041775, 639762)),
                PlaceholderSpec::new(Object, 4)
                    .quarter()
                    .at(Rect::new(4645025, 2174875, 4041775, 3951288)),
            ],
        ),
        SlideLayout::new("Title Only", "titleOnly", vec![title()]),
        SlideLayout::new("Blank", "blank", Vec::new()),
        SlideLayout::new(
            "Content with Caption",
            "objTx",
            vec![
                title().at(Rect::new(457200, 273050, 3008313, 1162050)),
                PlaceholderSpec::new(Object, 1).at(Rect::new(3575050, 273050, 5111750, 5853113)),
                PlaceholderSpec::new(Body, 2)
                    .half()
                    .at(Rect::new(457200, 1435100, 3008313, 4691063)),
            ],
        ),
        SlideLayout::new(
            "Picture with Caption",
            "picTx",
            vec![
                title().at(Rect::new(1792288, 4800600, 5486400, 566738)),
                PlaceholderSpec::new(Picture, 1).at(Rect::new(1792288, 612775, 5486400, 4114800)),
                PlaceholderSpec::new(Body, 2)
                    .quarter()
                    .at(Rect::new(1792288, 5367338, 5486400, 804862)),
            ],
        ),
        SlideLayout::new(
            "Title and Vertical Text",
            "vertTx",
            vec![title(), PlaceholderSpec::new(Body, 1).vertical()],
        ),
        SlideLayout::new(
            "Vertical Title and Text",
            "vertTitleAndTx",
            vec![
                title()
                    .vertical()
                    .at(Rect::new(6629400, 274638, 2057400, 5851525)),
                PlaceholderSpec::new(Body, 1)
                    .vertical()
                    .at(Rect::new(457200, 274638, 6019800, 5851525)),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_order() {
        let layouts = default_layouts();
        let names: Vec<&str> = layouts.iter().map(|l| l.name()).collect();
        assert_eq!(
            names,
            [
                "Title Slide",
                "Title and Content",
                "Section Header",
                "Two Content",
                "Comparison",
                "Title Only",
                "Blank",
                "Content with Caption",
                "Picture with Caption",
                "Title and Vertical Text",
                "Vertical Title and Text",
            ]
        );
    }

    #[test]
    fn test_title_and_content_regions() {
        let layouts = default_layouts();
        let layout = &layouts[TITLE_AND_CONTENT];

        assert_eq!(layout.title().unwrap().ph_type, PlaceholderType::Title);
        assert_eq!(layout.placeholder(1).unwrap().ph_type, PlaceholderType::Object);
        assert!(layout.placeholder(2).is_none());
    }

    #[test]
    fn test_blank_has_no_content_regions() {
        let layouts = default_layouts();
        let blank = layouts.iter().find(|l| l.name() == "Blank").unwrap();

        assert!(blank.title().is_none());
        assert!(blank.placeholders().iter().all(|ph| !ph.ph_type.is_copied_to_slide()));
    }

    #[test]
    fn test_ph_type_attribute_round_trip() {
        for ph_type in [
            PlaceholderType::Title,
            PlaceholderType::CenterTitle,
            PlaceholderType::SubTitle,
            PlaceholderType::Body,
            PlaceholderType::Picture,
            PlaceholderType::SlideNumber,
        ] {
            assert_eq!(PlaceholderType::from_ph_type(ph_type.ph_type().unwrap()), ph_type);
        }
        assert_eq!(PlaceholderType::Object.ph_type(), None);
        assert_eq!(PlaceholderType::from_ph_type("somethingElse"), PlaceholderType::Object);
    }
}
