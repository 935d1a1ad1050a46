use crate::page::{PageContext, font_resource_name};
use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use refcards_render_core::{DrawingSurface, FontFace, RenderError, Stroke, TextStyle};
use refcards_types::{ImageId, PixelFormat, Point, Raster, Rect, Size};
use std::io::Write;

/// Metadata written to the document's Info dictionary.
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub producer: String,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            title: "QR Cards".to_string(),
            producer: concat!("refcards ", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// An in-memory PDF drawing surface built on `lopdf`.
///
/// Pages share a single resources dictionary holding the two Helvetica faces
/// and every registered image, so each image is embedded once no matter how
/// often it is drawn.
pub struct LopdfSurface {
    document: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    images: Vec<ObjectId>,
    current: Option<PageContext>,
    info: DocumentInfo,
}

impl LopdfSurface {
    pub fn new() -> Self {
        Self::with_info(DocumentInfo::default())
    }

    pub fn with_info(info: DocumentInfo) -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let resources_id = document.new_object_id();
        Self {
            document,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            images: Vec::new(),
            current: None,
            info,
        }
    }

    fn page_mut(&mut self) -> Result<&mut PageContext, RenderError> {
        self.current.as_mut().ok_or(RenderError::NoActivePage)
    }

    fn flush_page(&mut self) -> Result<(), RenderError> {
        let Some(page) = self.current.take() else {
            return Ok(());
        };
        let size = page.size;
        let content = page
            .finish()
            .encode()
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let content_stream = Stream::new(
            dictionary! { "Filter" => "FlateDecode" },
            deflate(&content)?,
        );
        let content_id = self.document.add_object(content_stream);

        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), size.width.into(), size.height.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        };
        let page_id = self.document.add_object(page_dict);
        self.page_ids.push(page_id);
        log::trace!("Flushed page {}", self.page_ids.len());
        Ok(())
    }

    fn write_resources(&mut self) {
        let mut fonts = Dictionary::new();
        for face in [FontFace::Regular, FontFace::Bold] {
            let font_id = self.document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.postscript_name(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font_resource_name(face), font_id);
        }

        let mut xobjects = Dictionary::new();
        for (index, object_id) in self.images.iter().enumerate() {
            xobjects.set(ImageId::new(index as u32).to_string(), *object_id);
        }

        let resources = dictionary! {
            "Font" => fonts,
            "XObject" => xobjects,
        };
        self.document
            .objects
            .insert(self.resources_id, Object::Dictionary(resources));
    }

    fn write_info(&mut self) -> ObjectId {
        let created = chrono::Utc::now().format("D:%Y%m%d%H%M%SZ").to_string();
        self.document.add_object(dictionary! {
            "Title" => Object::string_literal(self.info.title.as_str()),
            "Producer" => Object::string_literal(self.info.producer.as_str()),
            "CreationDate" => Object::string_literal(created),
        })
    }
}

impl Default for LopdfSurface {
    fn default() -> Self {
        Self::new()
    }
}

fn deflate(bytes: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}

impl DrawingSurface for LopdfSurface {
    fn begin_page(&mut self, size: Size) -> Result<(), RenderError> {
        self.flush_page()?;
        self.current = Some(PageContext::new(size));
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) -> Result<(), RenderError> {
        self.page_mut()?.stroke_rect(rect, stroke);
        Ok(())
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), RenderError> {
        self.page_mut()?.stroke_line(from, to, stroke);
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        style: &TextStyle,
    ) -> Result<(), RenderError> {
        self.page_mut()?.draw_text(text, origin, style);
        Ok(())
    }

    fn register_image(&mut self, image: &Raster) -> Result<ImageId, RenderError> {
        let color_space = match image.format() {
            PixelFormat::Luma8 => "DeviceGray",
            PixelFormat::Rgb8 => "DeviceRGB",
        };
        let stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width() as i64,
                "Height" => image.height() as i64,
                "ColorSpace" => color_space,
                "BitsPerComponent" => 8,
                "Filter" => "FlateDecode",
            },
            deflate(image.pixels())?,
        );
        let object_id = self.document.add_object(stream);
        let id = ImageId::new(self.images.len() as u32);
        self.images.push(object_id);
        log::debug!(
            "Registered image {} ({}x{} {})",
            id,
            image.width(),
            image.height(),
            color_space
        );
        Ok(id)
    }

    fn draw_image(&mut self, image: ImageId, rect: Rect) -> Result<(), RenderError> {
        if image.index() as usize >= self.images.len() {
            return Err(RenderError::UnknownImage(image.to_string()));
        }
        self.page_mut()?.draw_image(image, rect);
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.page_ids.len() + usize::from(self.current.is_some())
    }

    fn finish(mut self) -> Result<Vec<u8>, RenderError> {
        self.flush_page()?;
        self.write_resources();

        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
        self.document.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => self.page_ids.len() as i64,
            }),
        );

        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        let info_id = self.write_info();
        self.document.trailer.set("Root", catalog_id);
        self.document.trailer.set("Info", info_id);

        let mut buffer = Vec::new();
        self.document
            .save_to(&mut buffer)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        log::debug!(
            "Finished PDF: {} pages, {} images, {} bytes",
            self.page_ids.len(),
            self.images.len(),
            buffer.len()
        );
        Ok(buffer)
    }
}
