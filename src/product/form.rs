//! The product form shared by the create and edit pages.

use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error,
    form::{InputField, parse_amount, parse_count, select_field},
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    product::{Gender, Product, ProductName},
    store::split_list,
};

/// Form data for creating or editing a product.
///
/// List fields are entered as comma separated text.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    pub name: String,
    pub category_id: String,
    pub description: String,
    pub gender: String,
    pub price: String,
    pub stock: String,
    pub sizes: String,
    pub colors: String,
    pub materials: String,
    pub tags: String,
    pub images: String,
    pub occasions: String,
    pub suitable_for_body_type: String,
    pub suitable_for_skin_tone: String,
    pub temperature_suitability: String,
    pub suitable_for_face_shape: String,
    pub recommended_for_style: String,
}

impl ProductForm {
    /// Validate the form and convert it into a product without an ID or
    /// creation time.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyProductName] for a blank name, and
    /// [Error::InvalidNumber] or [Error::NegativeAmount] for a bad price or
    /// stock.
    pub fn to_product(&self) -> Result<Product, Error> {
        let name = ProductName::new(&self.name)?;
        let price = parse_amount("Price", &self.price)?;
        let stock = parse_count("Stock", &self.stock)?;

        Ok(Product {
            name: name.to_string(),
            category_id: self.category_id.trim().to_owned(),
            description: self.description.trim().to_owned(),
            gender: Gender::parse(&self.gender),
            price,
            stock,
            sizes: split_list(&self.sizes),
            colors: split_list(&self.colors),
            materials: split_list(&self.materials),
            tags: split_list(&self.tags),
            images: split_list(&self.images),
            occasions: split_list(&self.occasions),
            suitable_for_body_type: split_list(&self.suitable_for_body_type),
            suitable_for_skin_tone: split_list(&self.suitable_for_skin_tone),
            temperature_suitability: split_list(&self.temperature_suitability),
            suitable_for_face_shape: split_list(&self.suitable_for_face_shape),
            recommended_for_style: split_list(&self.recommended_for_style),
            ..Default::default()
        })
    }
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category_id: product.category_id.clone(),
            description: product.description.clone(),
            gender: product.gender.as_str().to_owned(),
            price: product.price.to_string(),
            stock: product.stock.to_string(),
            sizes: product.sizes.join(", "),
            colors: product.colors.join(", "),
            materials: product.materials.join(", "),
            tags: product.tags.join(", "),
            images: product.images.join(", "),
            occasions: product.occasions.join(", "),
            suitable_for_body_type: product.suitable_for_body_type.join(", "),
            suitable_for_skin_tone: product.suitable_for_skin_tone.join(", "),
            temperature_suitability: product.temperature_suitability.join(", "),
            suitable_for_face_shape: product.suitable_for_face_shape.join(", "),
            recommended_for_style: product.recommended_for_style.join(", "),
        }
    }
}

/// The inputs of the product form, without the surrounding `<form>`.
pub fn product_form_fields(form: &ProductForm) -> Markup {
    let gender = if form.gender.is_empty() {
        Gender::default().as_str()
    } else {
        form.gender.as_str()
    };

    let list_fields = [
        ("sizes", "Sizes", form.sizes.as_str(), "S, M, L"),
        ("colors", "Colors", form.colors.as_str(), "black, white"),
        ("materials", "Materials", form.materials.as_str(), "cotton"),
        ("tags", "Tags", form.tags.as_str(), "casual, summer"),
        ("images", "Image URLs", form.images.as_str(), "https://..."),
        ("occasions", "Occasions", form.occasions.as_str(), "office, party"),
        (
            "suitable_for_body_type",
            "Suitable Body Types",
            form.suitable_for_body_type.as_str(),
            "",
        ),
        (
            "suitable_for_skin_tone",
            "Suitable Skin Tones",
            form.suitable_for_skin_tone.as_str(),
            "",
        ),
        (
            "temperature_suitability",
            "Temperature Suitability",
            form.temperature_suitability.as_str(),
            "warm, cold",
        ),
        (
            "suitable_for_face_shape",
            "Suitable Face Shapes",
            form.suitable_for_face_shape.as_str(),
            "",
        ),
        (
            "recommended_for_style",
            "Recommended Styles",
            form.recommended_for_style.as_str(),
            "minimalist",
        ),
    ];

    html! {
        (InputField::text("name", "Name", &form.name)
            .placeholder("Product name")
            .required()
            .into_html())
        (InputField::text("category_id", "Category", &form.category_id).into_html())

        div
        {
            label for="description" class=(FORM_LABEL_STYLE) { "Description" }
            textarea
                id="description"
                name="description"
                rows="4"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                (form.description)
            }
        }

        (select_field("gender", "Gender", &Gender::FORM_OPTIONS, gender))
        (InputField::text("price", "Price", &form.price)
            .type_("number")
            .required()
            .into_html())
        (InputField::text("stock", "Stock", &form.stock)
            .type_("number")
            .into_html())

        div class="text-sm text-gray-500 dark:text-gray-400"
        {
            "Separate multiple values with commas."
        }

        @for (name, label, value, placeholder) in list_fields {
            (InputField::text(name, label, value).placeholder(placeholder).into_html())
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        product::{Gender, Product},
    };

    use super::ProductForm;

    #[test]
    fn converts_comma_separated_lists() {
        let form = ProductForm {
            name: " Kebaya ".to_owned(),
            price: "350000".to_owned(),
            stock: "4".to_owned(),
            gender: "female".to_owned(),
            sizes: "S, M,, M ,L".to_owned(),
            ..Default::default()
        };

        let product = form.to_product().unwrap();

        assert_eq!(product.name, "Kebaya");
        assert_eq!(product.gender, Gender::Female);
        assert_eq!(product.sizes, ["S", "M", "L"]);
        assert_eq!(product.stock, 4);
        assert!(product.created_at.is_none());
    }

    #[test]
    fn rejects_blank_name_before_numbers() {
        let form = ProductForm {
            price: "-1".to_owned(),
            ..Default::default()
        };

        assert_eq!(form.to_product(), Err(Error::EmptyProductName));
    }

    #[test]
    fn rejects_fractional_stock() {
        let form = ProductForm {
            name: "Hat".to_owned(),
            price: "10".to_owned(),
            stock: "2.5".to_owned(),
            ..Default::default()
        };

        assert_eq!(
            form.to_product(),
            Err(Error::InvalidNumber("Stock", "2.5".to_owned()))
        );
    }

    #[test]
    fn prefills_from_product() {
        let product = Product {
            name: "Hat".to_owned(),
            price: 1500.5,
            colors: vec!["red".to_owned(), "blue".to_owned()],
            ..Default::default()
        };

        let form = ProductForm::from(&product);

        assert_eq!(form.colors, "red, blue");
        assert_eq!(form.price, "1500.5");
        assert_eq!(form.gender, "unisex");
    }
}
